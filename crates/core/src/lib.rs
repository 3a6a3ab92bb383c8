#![forbid(unsafe_code)]

pub mod deck;
pub mod model;
pub mod paginator;

pub use deck::{
    CardTransform, FlashcardDeck, GestureOutcome, GesturePhase, PointerTracker, SwipeDirection,
};
pub use paginator::{PAGE_SIZE, SetPaginator};
