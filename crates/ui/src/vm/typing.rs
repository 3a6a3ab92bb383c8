//! Typing-animation timeline.
//!
//! The animation is computed up front as a plain list of delayed steps, so
//! the pacing rules live in testable code and the Dioxus driver is a dumb
//! sleep-and-apply loop. Text blocks reveal 2–3 characters per 10 ms tick;
//! rich blocks are inserted whole after all text has finished, the first
//! immediately and each further one on a 100 ms stagger, and the message
//! becomes interactive after a final settle step.
//!
//! Cancellation: each animation runs under a generation id. When a new
//! message starts animating it bumps the generation; the superseded task
//! notices, reveals its message instantly, and stops. Two animations never
//! interleave partial writes.

use std::time::Duration;

use crate::vm::formatter::MessageBlock;

pub const TICK: Duration = Duration::from_millis(10);
pub const RICH_STAGGER: Duration = Duration::from_millis(100);
pub const SETTLE: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingStep {
    /// Make the first `visible_chars` characters of a text block visible.
    Reveal { block: usize, visible_chars: usize },
    /// Insert a rich block whole.
    ShowRich { block: usize },
    /// All content is in place; wire up interactions.
    Settle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedStep {
    /// Delay before this step, relative to the previous one.
    pub delay: Duration,
    pub step: TypingStep,
}

/// Characters revealed by the n-th tick of a block. Alternates 3 and 2 to
/// land in the fixed 2–3 range without feeling metronomic.
fn chunk_len(tick: usize) -> usize {
    if tick % 2 == 0 { 3 } else { 2 }
}

/// Build the reveal timeline for a formatted message.
#[must_use]
pub fn build_timeline(blocks: &[MessageBlock]) -> Vec<TimedStep> {
    let mut steps = Vec::new();

    for (index, block) in blocks.iter().enumerate() {
        let Some(text) = block.typed_text() else {
            continue;
        };
        let total = text.chars().count();
        let mut visible = 0;
        let mut tick = 0;
        while visible < total {
            visible = (visible + chunk_len(tick)).min(total);
            steps.push(TimedStep {
                delay: TICK,
                step: TypingStep::Reveal {
                    block: index,
                    visible_chars: visible,
                },
            });
            tick += 1;
        }
        // Zero-length text still needs its block switched to visible.
        if total == 0 {
            steps.push(TimedStep {
                delay: TICK,
                step: TypingStep::Reveal {
                    block: index,
                    visible_chars: 0,
                },
            });
        }
    }

    let mut staggered = 0;
    for (index, block) in blocks.iter().enumerate() {
        if block.is_rich() {
            // First rich block lands as soon as the text finishes; each
            // further one staggers in behind it.
            let delay = if staggered == 0 {
                Duration::ZERO
            } else {
                RICH_STAGGER
            };
            staggered += 1;
            steps.push(TimedStep {
                delay,
                step: TypingStep::ShowRich { block: index },
            });
        }
    }

    steps.push(TimedStep {
        delay: SETTLE,
        step: TypingStep::Settle,
    });
    steps
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::formatter::format_message;

    fn reveal_counts(steps: &[TimedStep], block: usize) -> Vec<usize> {
        steps
            .iter()
            .filter_map(|timed| match timed.step {
                TypingStep::Reveal {
                    block: b,
                    visible_chars,
                } if b == block => Some(visible_chars),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn reveals_two_to_three_chars_per_tick() {
        let msg = format_message("abcdefghij"); // 10 chars
        let steps = build_timeline(&msg.blocks);
        let counts = reveal_counts(&steps, 0);
        assert_eq!(*counts.last().unwrap(), 10);
        let mut prev = 0;
        for count in counts {
            let chunk = count - prev;
            assert!((1..=3).contains(&chunk), "chunk of {chunk}");
            prev = count;
        }
        for timed in &steps {
            if matches!(timed.step, TypingStep::Reveal { .. }) {
                assert_eq!(timed.delay, TICK);
            }
        }
    }

    #[test]
    fn reveal_counts_are_monotonic_and_complete() {
        let msg = format_message("First paragraph here.\n\nSecond one.");
        let steps = build_timeline(&msg.blocks);
        for block in 0..2 {
            let counts = reveal_counts(&steps, block);
            assert!(counts.windows(2).all(|w| w[0] < w[1]));
            let total = msg.blocks[block].typed_text().unwrap().chars().count();
            assert_eq!(*counts.last().unwrap(), total);
        }
    }

    #[test]
    fn rich_blocks_come_after_all_text_with_stagger() {
        let raw = concat!(
            "Intro text.\n\n",
            r#"[STUDY_SETS_DATA]{"studySets":[]}[/STUDY_SETS_DATA]"#,
            "\n\nTrailing text.\n\n[Open Flashcard Set Draft for Maths]",
        );
        let msg = format_message(raw);
        let steps = build_timeline(&msg.blocks);

        let first_rich = steps
            .iter()
            .position(|t| matches!(t.step, TypingStep::ShowRich { .. }))
            .unwrap();
        assert!(
            steps[first_rich..]
                .iter()
                .all(|t| !matches!(t.step, TypingStep::Reveal { .. })),
            "text revealed after a rich block"
        );

        let rich_delays: Vec<Duration> = steps
            .iter()
            .filter(|t| matches!(t.step, TypingStep::ShowRich { .. }))
            .map(|t| t.delay)
            .collect();
        // Relative offsets 0 ms, 100 ms: the first rich block does not wait.
        assert_eq!(rich_delays, vec![Duration::ZERO, RICH_STAGGER]);
    }

    #[test]
    fn timeline_always_ends_with_settle() {
        let plain = build_timeline(&format_message("hi").blocks);
        assert_eq!(
            plain.last().unwrap().step,
            TypingStep::Settle
        );
        assert_eq!(plain.last().unwrap().delay, SETTLE);

        let empty = build_timeline(&[]);
        assert_eq!(empty.len(), 1);
        assert_eq!(empty[0].step, TypingStep::Settle);
    }

    #[test]
    fn unicode_text_counts_characters_not_bytes() {
        let msg = format_message("héllo wörld — done");
        let steps = build_timeline(&msg.blocks);
        let total = msg.blocks[0].typed_text().unwrap().chars().count();
        assert_eq!(*reveal_counts(&steps, 0).last().unwrap(), total);
    }
}
