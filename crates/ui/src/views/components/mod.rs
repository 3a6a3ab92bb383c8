mod composer;
mod flashcard_stack;
mod study_sets;
mod transcript;

pub use composer::Composer;
pub use flashcard_stack::FlashcardStack;
pub use study_sets::StudySetCards;
pub use transcript::Transcript;
