mod chat;
mod study_set;

pub use chat::{ChatTurn, Role};
pub use study_set::{AttachmentDraft, AttachmentKind, Flashcard, StudySet};
