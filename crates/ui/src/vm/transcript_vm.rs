//! Transcript entries and typing-state bookkeeping for the chat view.

use crate::vm::formatter::{FormattedMessage, MessageBlock};
use crate::vm::typing::TypingStep;

/// How much of a block is currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockVisibility {
    Hidden,
    /// First n characters of the plain text, styled block not yet swapped in.
    Partial(usize),
    Full,
}

/// One assistant message plus its reveal state.
#[derive(Debug, Clone, PartialEq)]
pub struct RichMessage {
    pub formatted: FormattedMessage,
    pub visibility: Vec<BlockVisibility>,
    /// Set by the settle step; card lists and draft cards only respond to
    /// input once this is true.
    pub interactive: bool,
}

impl RichMessage {
    #[must_use]
    pub fn new(formatted: FormattedMessage) -> Self {
        let visibility = vec![BlockVisibility::Hidden; formatted.blocks.len()];
        Self {
            formatted,
            visibility,
            interactive: false,
        }
    }

    /// Apply one typing step.
    pub fn apply(&mut self, step: TypingStep) {
        match step {
            TypingStep::Reveal {
                block,
                visible_chars,
            } => {
                let Some(slot) = self.visibility.get_mut(block) else {
                    return;
                };
                let total = self.formatted.blocks[block]
                    .typed_text()
                    .map_or(0, |t| t.chars().count());
                *slot = if visible_chars >= total {
                    BlockVisibility::Full
                } else {
                    BlockVisibility::Partial(visible_chars)
                };
            }
            TypingStep::ShowRich { block } => {
                if let Some(slot) = self.visibility.get_mut(block) {
                    *slot = BlockVisibility::Full;
                }
            }
            TypingStep::Settle => self.interactive = true,
        }
    }

    /// Jump to the fully revealed, interactive state. Used when a newer
    /// message supersedes this one's animation.
    pub fn reveal_all(&mut self) {
        for slot in &mut self.visibility {
            *slot = BlockVisibility::Full;
        }
        self.interactive = true;
    }

    /// Plain-text prefix to show for a partially revealed block.
    #[must_use]
    pub fn partial_text(&self, block: usize) -> Option<String> {
        match self.visibility.get(block)? {
            BlockVisibility::Partial(chars) => {
                let text = self.formatted.blocks.get(block)?.typed_text()?;
                Some(text.chars().take(*chars).collect())
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn blocks(&self) -> &[MessageBlock] {
        &self.formatted.blocks
    }
}

/// One visible row of the transcript.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptEntry {
    User(String),
    Assistant(RichMessage),
    ErrorBubble(String),
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::formatter::format_message;
    use crate::vm::typing::build_timeline;

    #[test]
    fn applying_the_full_timeline_reveals_everything() {
        let raw = concat!(
            "Some intro.\n\n",
            r#"[STUDY_SETS_DATA]{"studySets":[]}[/STUDY_SETS_DATA]"#,
        );
        let mut rich = RichMessage::new(format_message(raw));
        assert!(!rich.interactive);

        for timed in build_timeline(rich.blocks()) {
            rich.apply(timed.step);
        }

        assert!(rich.interactive);
        assert!(
            rich.visibility
                .iter()
                .all(|v| *v == BlockVisibility::Full)
        );
    }

    #[test]
    fn partial_reveal_exposes_a_character_prefix() {
        let mut rich = RichMessage::new(format_message("abcdef"));
        rich.apply(TypingStep::Reveal {
            block: 0,
            visible_chars: 3,
        });
        assert_eq!(rich.partial_text(0).as_deref(), Some("abc"));
        assert_eq!(rich.visibility[0], BlockVisibility::Partial(3));
    }

    #[test]
    fn reveal_past_the_end_is_full() {
        let mut rich = RichMessage::new(format_message("ab"));
        rich.apply(TypingStep::Reveal {
            block: 0,
            visible_chars: 99,
        });
        assert_eq!(rich.visibility[0], BlockVisibility::Full);
        assert!(rich.partial_text(0).is_none());
    }

    #[test]
    fn reveal_all_supersedes_mid_animation() {
        let mut rich = RichMessage::new(format_message("one\n\ntwo\n\nthree"));
        rich.apply(TypingStep::Reveal {
            block: 0,
            visible_chars: 1,
        });
        rich.reveal_all();
        assert!(rich.interactive);
        assert!(rich.partial_text(0).is_none());
    }

    #[test]
    fn out_of_range_steps_are_ignored() {
        let mut rich = RichMessage::new(format_message("hi"));
        rich.apply(TypingStep::ShowRich { block: 40 });
        rich.apply(TypingStep::Reveal {
            block: 40,
            visible_chars: 2,
        });
        assert_eq!(rich.visibility.len(), 1);
    }
}
