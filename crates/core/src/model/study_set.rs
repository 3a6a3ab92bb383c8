use serde::{Deserialize, Serialize};

//
// ─── STUDY SETS ────────────────────────────────────────────────────────────────
//

/// One term/definition pair inside a study set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub term: String,
    pub definition: String,
}

impl Flashcard {
    #[must_use]
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
        }
    }
}

/// A named collection of flashcards offered to the user as a selectable card.
///
/// Sets are never mutated after construction; the UI only paginates over
/// them and reads their flashcards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySet {
    /// Locally assigned, stable within one rendered card list. The wire
    /// format carries no id; the receiver numbers sets by position.
    pub id: u64,
    pub title: String,
    pub term_count: u32,
    pub studiers_today: u32,
    pub flashcards: Vec<Flashcard>,
}

impl StudySet {
    #[must_use]
    pub fn new(
        id: u64,
        title: impl Into<String>,
        studiers_today: u32,
        flashcards: Vec<Flashcard>,
    ) -> Self {
        let term_count = u32::try_from(flashcards.len()).unwrap_or(u32::MAX);
        Self {
            id,
            title: title.into(),
            term_count,
            studiers_today,
            flashcards,
        }
    }
}

//
// ─── ATTACHMENTS ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Document,
}

impl AttachmentKind {
    /// Wire value for the backend's `fileType` multipart field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Document => "document",
        }
    }

    /// Classify a file by its name. Anything that is not a known image
    /// extension is treated as a document.
    #[must_use]
    pub fn from_file_name(name: &str) -> Self {
        let ext = name.rsplit('.').next().unwrap_or("").to_ascii_lowercase();
        match ext.as_str() {
            "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp" => Self::Image,
            _ => Self::Document,
        }
    }
}

/// A file staged for the next submission. At most one exists at a time;
/// it is dropped on submit or explicit removal and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentDraft {
    pub name: String,
    pub size: u64,
    pub kind: AttachmentKind,
    pub bytes: Vec<u8>,
}

impl AttachmentDraft {
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let kind = AttachmentKind::from_file_name(&name);
        let size = bytes.len() as u64;
        Self {
            name,
            size,
            kind,
            bytes,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_count_tracks_flashcards() {
        let set = StudySet::new(
            0,
            "Biology",
            12,
            vec![
                Flashcard::new("Mitochondria", "Powerhouse of the cell"),
                Flashcard::new("Ribosome", "Builds proteins"),
            ],
        );
        assert_eq!(set.term_count, 2);
    }

    #[test]
    fn attachment_kind_classifies_by_extension() {
        assert_eq!(
            AttachmentKind::from_file_name("notes.PNG"),
            AttachmentKind::Image
        );
        assert_eq!(
            AttachmentKind::from_file_name("chapter4.pdf"),
            AttachmentKind::Document
        );
        assert_eq!(
            AttachmentKind::from_file_name("no_extension"),
            AttachmentKind::Document
        );
    }

    #[test]
    fn attachment_draft_records_size_and_kind() {
        let draft = AttachmentDraft::new("diagram.jpg", vec![0u8; 64]);
        assert_eq!(draft.size, 64);
        assert_eq!(draft.kind, AttachmentKind::Image);
    }
}
