//! Inline styles for the card animations: flashcard gestures and the
//! study-set expand/collapse swap.

use coach_core::{CardTransform, SwipeDirection};

/// Committed-swipe exit animation length.
pub const EXIT_MS: u64 = 400;
/// Spring-back animation length for an uncommitted swipe.
pub const SPRING_MS: u64 = 300;
/// Expand/collapse swap tween length for a study-set card.
pub const SWAP_MS: u64 = 150;

const EXIT_TRANSLATE_PX: f64 = 480.0;
const EXIT_ROTATE_DEG: f64 = 24.0;

/// Style for the active card while the pointer drags it.
#[must_use]
pub fn live_card_style(transform: &CardTransform) -> String {
    format!(
        "transform: translateX({:.1}px) rotate({:.2}deg); opacity: {:.3}; transition: none;",
        transform.translate_x, transform.rotate_deg, transform.opacity
    )
}

/// Style that sends the active card off-stage after a committed swipe.
#[must_use]
pub fn exit_card_style(direction: SwipeDirection) -> String {
    let sign = direction.sign();
    format!(
        "transform: translateX({:.0}px) rotate({:.0}deg); opacity: 0; \
         transition: transform {EXIT_MS}ms ease-out, opacity {EXIT_MS}ms ease-out;",
        sign * EXIT_TRANSLATE_PX,
        sign * EXIT_ROTATE_DEG
    )
}

/// Style that eases the card back to rest after an uncommitted swipe.
#[must_use]
pub fn spring_back_style() -> String {
    format!(
        "transform: translateX(0px) rotate(0deg); opacity: 1; \
         transition: transform {SPRING_MS}ms ease, opacity {SPRING_MS}ms ease;"
    )
}

/// Style that fades a study-set card out ahead of swapping its body.
#[must_use]
pub fn swap_out_style() -> String {
    format!(
        "opacity: 0; transform: scale(0.96); \
         transition: opacity {SWAP_MS}ms ease, transform {SWAP_MS}ms ease;"
    )
}
