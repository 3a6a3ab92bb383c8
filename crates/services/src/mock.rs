//! Fixed fallback catalog.
//!
//! Served when the backend's embedded study-set payload fails to parse and
//! as offline demo data. The user never sees a parse error; they see these
//! sets instead.

use coach_core::model::{Flashcard, StudySet};

/// Build the mock catalog. Ids are positional and stable per call.
#[must_use]
pub fn mock_catalog() -> Vec<StudySet> {
    let raw: [(&str, u32, &[(&str, &str)]); 6] = [
        (
            "Biology: Cell Structure",
            214,
            &[
                ("Mitochondria", "Organelles that produce ATP through cellular respiration"),
                ("Ribosome", "Site of protein synthesis"),
                ("Nucleus", "Contains the cell's genetic material"),
                ("Cell membrane", "Selectively permeable barrier around the cell"),
            ],
        ),
        (
            "Algebra: Linear Equations",
            158,
            &[
                ("Slope", "Rate of change between two points, rise over run"),
                ("Y-intercept", "Where a line crosses the y-axis"),
                ("Slope-intercept form", "y = mx + b"),
            ],
        ),
        (
            "World History: World War II",
            301,
            &[
                ("D-Day", "Allied invasion of Normandy, June 6, 1944"),
                ("Lend-Lease Act", "US program supplying Allied nations with materiel"),
                ("V-E Day", "Victory in Europe, May 8, 1945"),
            ],
        ),
        (
            "Spanish: Common Verbs",
            127,
            &[
                ("ser", "to be (permanent)"),
                ("estar", "to be (temporary)"),
                ("tener", "to have"),
                ("hacer", "to do, to make"),
            ],
        ),
        (
            "Chemistry: Periodic Trends",
            96,
            &[
                ("Electronegativity", "Tendency of an atom to attract shared electrons"),
                ("Ionization energy", "Energy required to remove an electron"),
                ("Atomic radius", "Distance from nucleus to outermost electron shell"),
            ],
        ),
        (
            "Psychology: Memory",
            183,
            &[
                ("Working memory", "Short-term store for active manipulation"),
                ("Encoding", "Converting perception into a memory trace"),
                ("Spaced repetition", "Reviewing at increasing intervals to fight forgetting"),
            ],
        ),
    ];

    raw.iter()
        .enumerate()
        .map(|(id, (title, studiers, cards))| {
            let flashcards = cards
                .iter()
                .map(|(term, definition)| Flashcard::new(*term, *definition))
                .collect();
            StudySet::new(id as u64, *title, *studiers, flashcards)
        })
        .collect()
}
