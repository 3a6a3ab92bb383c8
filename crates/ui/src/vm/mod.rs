pub mod deck_vm;
pub mod formatter;
pub mod transcript_vm;
pub mod typing;

pub use deck_vm::{
    EXIT_MS, SPRING_MS, SWAP_MS, exit_card_style, live_card_style, spring_back_style,
    swap_out_style,
};
pub use formatter::{FormattedMessage, MessageBlock, escape_html, format_message, sanitize_block};
pub use transcript_vm::{BlockVisibility, RichMessage, TranscriptEntry};
pub use typing::{RICH_STAGGER, SETTLE, TICK, TimedStep, TypingStep, build_timeline};
