//! Assistant-message formatting.
//!
//! Turns one raw assistant reply into a list of renderable blocks. Source
//! text is HTML-escaped before any markup substitution, so model output can
//! never smuggle markup in; the produced HTML additionally passes through
//! an ammonia allowlist before it reaches the DOM.
//!
//! Paragraphs are classified independently, by precedence: study-set
//! island > draft-link marker > step header > bare math line > success
//! callout > bullet list > numbered list > paragraph (with inline markup
//! and inline-math spans). The two rich-UI blocks are emitted at most once
//! per message; repeat triggers degrade to escaped text.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use coach_core::model::StudySet;
use services::response::{extract_draft_topic, parse_reply, reconstruct_topic};

//
// ─── BLOCKS ────────────────────────────────────────────────────────────────────
//

/// One renderable unit of an assistant message.
///
/// Text-bearing variants carry both the final `html` and the plain `text`
/// the typing animator reveals before swapping the styled block in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBlock {
    Paragraph { html: String, text: String },
    StepHeader { number: u32, html: String, text: String },
    MathBlock { html: String, text: String },
    Callout { html: String, text: String },
    BulletList { html: String, text: String },
    NumberedList { html: String, text: String },
    /// The study-set card list. Sets live on [`FormattedMessage::sets`];
    /// `topic_hint` feeds a "see more" refetch once they are exhausted.
    StudySets { topic_hint: String },
    /// A single synthesized study-set draft preview.
    DraftCard { topic: String },
}

impl MessageBlock {
    /// Rich-UI blocks skip character typing and fade in whole.
    #[must_use]
    pub fn is_rich(&self) -> bool {
        matches!(self, Self::StudySets { .. } | Self::DraftCard { .. })
    }

    /// Plain text revealed by the typing animator, `None` for rich blocks.
    #[must_use]
    pub fn typed_text(&self) -> Option<&str> {
        match self {
            Self::Paragraph { text, .. }
            | Self::StepHeader { text, .. }
            | Self::MathBlock { text, .. }
            | Self::Callout { text, .. }
            | Self::BulletList { text, .. }
            | Self::NumberedList { text, .. } => Some(text),
            Self::StudySets { .. } | Self::DraftCard { .. } => None,
        }
    }

    /// Final sanitized HTML, `None` for rich blocks (those render as
    /// components, not markup strings).
    #[must_use]
    pub fn html(&self) -> Option<&str> {
        match self {
            Self::Paragraph { html, .. }
            | Self::StepHeader { html, .. }
            | Self::MathBlock { html, .. }
            | Self::Callout { html, .. }
            | Self::BulletList { html, .. }
            | Self::NumberedList { html, .. } => Some(html),
            Self::StudySets { .. } | Self::DraftCard { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedMessage {
    pub blocks: Vec<MessageBlock>,
    /// Present when the reply carried a study-set island (possibly empty).
    pub sets: Option<Vec<StudySet>>,
}

//
// ─── FORMATTING ────────────────────────────────────────────────────────────────
//

/// Format one raw assistant reply.
#[must_use]
pub fn format_message(raw: &str) -> FormattedMessage {
    let parsed = parse_reply(raw);
    let topic_hint = reconstruct_topic(&parsed.visible_text());

    let mut guards = RichGuards::default();
    let mut blocks = Vec::new();

    push_text_blocks(&mut blocks, &parsed.lead, &mut guards);
    if parsed.sets.is_some() && !guards.saw_sets {
        guards.saw_sets = true;
        blocks.push(MessageBlock::StudySets { topic_hint });
    }
    push_text_blocks(&mut blocks, &parsed.trail, &mut guards);

    FormattedMessage {
        blocks,
        sets: parsed.sets,
    }
}

#[derive(Default)]
struct RichGuards {
    saw_sets: bool,
    saw_draft: bool,
}

fn push_text_blocks(blocks: &mut Vec<MessageBlock>, text: &str, guards: &mut RichGuards) {
    for paragraph in split_paragraphs(text) {
        blocks.push(classify_paragraph(&paragraph, guards));
    }
}

fn split_paragraphs(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

static STEP_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\*\*)?\s*Step\s+(\d+)\s*[:.]\s*(.*?)(?:\*\*)?\s*$").unwrap()
});
static NUMBERED_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+[.)]\s+").unwrap());

fn classify_paragraph(paragraph: &str, guards: &mut RichGuards) -> MessageBlock {
    if paragraph.contains("[Open Flashcard Set Draft") && !guards.saw_draft {
        guards.saw_draft = true;
        return MessageBlock::DraftCard {
            topic: extract_draft_topic(paragraph),
        };
    }

    if let Some(caps) = STEP_HEADER.captures(paragraph)
        && !paragraph.contains('\n')
    {
        let number: u32 = caps[1].parse().unwrap_or(0);
        let title = caps[2].trim();
        let title_html = apply_inline_markup(&escape_html(title));
        return MessageBlock::StepHeader {
            number,
            html: sanitize_block(&format!(
                "<h4 class=\"step-header\"><span class=\"step-number\">Step {number}</span> {title_html}</h4>"
            )),
            text: format!("Step {number}: {title}"),
        };
    }

    if is_bare_math_line(paragraph) {
        let escaped = escape_html(paragraph);
        return MessageBlock::MathBlock {
            html: sanitize_block(&format!("<div class=\"math-block\">{escaped}</div>")),
            text: paragraph.to_string(),
        };
    }

    if is_success_line(paragraph) {
        let html = apply_inline_markup(&escape_html(paragraph));
        return MessageBlock::Callout {
            html: sanitize_block(&format!("<p class=\"callout callout-success\">{html}</p>")),
            text: paragraph.to_string(),
        };
    }

    let lines: Vec<&str> = paragraph.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    if !lines.is_empty()
        && lines
            .iter()
            .all(|l| l.starts_with("- ") || l.starts_with("* ") || l.starts_with("• "))
    {
        return list_block(&lines, paragraph, false);
    }

    if !lines.is_empty() && lines.iter().all(|l| NUMBERED_ITEM.is_match(l)) {
        return list_block(&lines, paragraph, true);
    }

    let html = wrap_inline_math(&apply_inline_markup(&escape_html(paragraph)));
    MessageBlock::Paragraph {
        html: sanitize_block(&format!("<p>{html}</p>")),
        text: paragraph.to_string(),
    }
}

fn list_block(lines: &[&str], paragraph: &str, numbered: bool) -> MessageBlock {
    let items: Vec<String> = lines
        .iter()
        .map(|line| {
            let item = if numbered {
                NUMBERED_ITEM.replace(line, "").into_owned()
            } else {
                line[line.char_indices().nth(1).map_or(line.len(), |(i, _)| i)..]
                    .trim_start()
                    .to_string()
            };
            apply_inline_markup(&escape_html(&item))
        })
        .collect();

    let tag = if numbered { "ol" } else { "ul" };
    let body: String = items
        .iter()
        .map(|item| format!("<li>{item}</li>"))
        .collect();
    let html = sanitize_block(&format!("<{tag}>{body}</{tag}>"));
    let text = paragraph.to_string();

    if numbered {
        MessageBlock::NumberedList { html, text }
    } else {
        MessageBlock::BulletList { html, text }
    }
}

//
// ─── CLASSIFIERS ───────────────────────────────────────────────────────────────
//

static MATH_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z\s+\-*/×÷^=().,:%√]+$").unwrap());

fn is_bare_math_line(paragraph: &str) -> bool {
    if paragraph.contains('\n') || !paragraph.contains('=') {
        return false;
    }
    if !paragraph.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    if !MATH_CHARS.is_match(paragraph) {
        return false;
    }
    // Real words disqualify the line; short runs like `sin` or `x` don't.
    !paragraph
        .split_whitespace()
        .any(|word| word.chars().filter(|c| c.is_alphabetic()).count() > 3)
}

fn is_success_line(paragraph: &str) -> bool {
    let trimmed = paragraph.trim_start();
    trimmed.starts_with('✅') || trimmed.to_lowercase().starts_with("final answer")
}

//
// ─── INLINE MARKUP ─────────────────────────────────────────────────────────────
//

/// Escape raw text. Runs before any substitution so model output cannot
/// inject markup.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*([^*\s][^*]*)\*").unwrap());

fn apply_inline_markup(escaped: &str) -> String {
    let bolded = BOLD.replace_all(escaped, "<strong>$1</strong>");
    ITALIC.replace_all(&bolded, "<em>$1</em>").into_owned()
}

static INLINE_MATH: LazyLock<Regex> = LazyLock::new(|| {
    // Digit-anchored runs of arithmetic: `2x + 3 = 11`, `7 * 6`.
    Regex::new(r"\d[\dA-Za-z.]*(?:\s*[+\-*/×÷^=]\s*[\dA-Za-z.()]+)+").unwrap()
});

fn wrap_inline_math(html: &str) -> String {
    INLINE_MATH
        .replace_all(html, "<span class=\"math-inline\">$0</span>")
        .into_owned()
}

//
// ─── SANITIZING ────────────────────────────────────────────────────────────────
//

/// Allowlist pass over formatter-produced HTML before it reaches the DOM.
#[must_use]
pub fn sanitize_block(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "div", "span", "br", "em", "strong", "ul", "ol", "li", "h4",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    for tag in ["p", "div", "span", "h4"] {
        attributes.insert(tag, ["class"].into_iter().collect());
    }

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .clean(html)
        .to_string()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paragraphs_split_on_blank_lines() {
        let msg = format_message("First thought.\n\nSecond thought.");
        assert_eq!(msg.blocks.len(), 2);
        assert_eq!(
            msg.blocks[0].html(),
            Some("<p>First thought.</p>")
        );
    }

    #[test]
    fn escaping_runs_before_markup_substitution() {
        let msg = format_message("Watch out for <script>alert(1)</script> & friends");
        let html = msg.blocks[0].html().unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&amp; friends"));
    }

    #[test]
    fn bold_and_italic_apply_after_escaping() {
        let msg = format_message("This is **really** *important*");
        let html = msg.blocks[0].html().unwrap();
        assert!(html.contains("<strong>really</strong>"));
        assert!(html.contains("<em>important</em>"));
    }

    #[test]
    fn step_headers_become_semantic_blocks() {
        let msg = format_message("Step 2: Isolate the variable");
        match &msg.blocks[0] {
            MessageBlock::StepHeader { number, html, .. } => {
                assert_eq!(*number, 2);
                assert!(html.contains("step-number"));
                assert!(html.contains("Isolate the variable"));
            }
            other => panic!("expected step header, got {other:?}"),
        }
    }

    #[test]
    fn bare_equation_line_becomes_math_block() {
        let msg = format_message("2x + 3 = 11");
        assert!(matches!(msg.blocks[0], MessageBlock::MathBlock { .. }));
    }

    #[test]
    fn sentences_with_equals_are_not_math_blocks() {
        let msg = format_message("Remember that speed = distance over time");
        assert!(matches!(msg.blocks[0], MessageBlock::Paragraph { .. }));
    }

    #[test]
    fn success_lines_become_callouts() {
        let msg = format_message("✅ Final answer: x = 4");
        assert!(matches!(msg.blocks[0], MessageBlock::Callout { .. }));
    }

    #[test]
    fn bullet_and_numbered_lists_classify() {
        let msg = format_message("- one\n- two\n\n1. first\n2. second");
        match &msg.blocks[0] {
            MessageBlock::BulletList { html, .. } => {
                assert!(html.contains("<li>one</li>"));
            }
            other => panic!("expected bullet list, got {other:?}"),
        }
        match &msg.blocks[1] {
            MessageBlock::NumberedList { html, .. } => {
                assert!(html.contains("<li>second</li>"));
            }
            other => panic!("expected numbered list, got {other:?}"),
        }
    }

    #[test]
    fn inline_math_gets_wrapped_in_spans() {
        let msg = format_message("So we compute 2x + 3 = 11 and move on.");
        let html = msg.blocks[0].html().unwrap();
        assert!(html.contains("math-inline"));
    }

    #[test]
    fn island_yields_exactly_one_card_list_block() {
        let raw = concat!(
            "Here you go!\n\n",
            r#"[STUDY_SETS_DATA]{"studySets":[{"title":"A","cardCount":1,"flashcards":[]}]}[/STUDY_SETS_DATA]"#,
            "\n\nAnd another trigger: ",
            r#"[STUDY_SETS_DATA]{"studySets":[]}[/STUDY_SETS_DATA]"#,
        );
        let msg = format_message(raw);
        let card_lists = msg
            .blocks
            .iter()
            .filter(|b| matches!(b, MessageBlock::StudySets { .. }))
            .count();
        assert_eq!(card_lists, 1);
        assert_eq!(msg.sets.as_ref().unwrap().len(), 1);
        // The second trigger survives as escaped text.
        assert!(
            msg.blocks
                .iter()
                .any(|b| b.html().is_some_and(|h| h.contains("STUDY_SETS_DATA")))
        );
    }

    #[test]
    fn empty_island_renders_card_list_with_zero_sets() {
        let msg = format_message(
            r#"Here are sets: [STUDY_SETS_DATA]{"studySets":[]}[/STUDY_SETS_DATA]"#,
        );
        assert!(
            msg.blocks
                .iter()
                .any(|b| matches!(b, MessageBlock::StudySets { .. }))
        );
        assert_eq!(msg.sets.as_ref().unwrap().len(), 0);
    }

    #[test]
    fn draft_marker_yields_one_draft_card_with_topic() {
        let msg = format_message(
            "Ready when you are.\n\n[Open Flashcard Set Draft for Cell Biology]\n\n[Open Flashcard Set Draft for Algebra]",
        );
        let drafts: Vec<_> = msg
            .blocks
            .iter()
            .filter_map(|b| match b {
                MessageBlock::DraftCard { topic } => Some(topic.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(drafts, ["Cell Biology"]);
    }

    #[test]
    fn unmatched_draft_pattern_falls_back_to_placeholder() {
        let msg = format_message("[Open Flashcard Set Draft]");
        match &msg.blocks[0] {
            MessageBlock::DraftCard { topic } => assert_eq!(topic, "Your Topic"),
            other => panic!("expected draft card, got {other:?}"),
        }
    }

    #[test]
    fn typed_text_covers_text_blocks_only() {
        let msg = format_message(
            "Intro.\n\n[STUDY_SETS_DATA]{\"studySets\":[]}[/STUDY_SETS_DATA]",
        );
        let rich: Vec<bool> = msg.blocks.iter().map(MessageBlock::is_rich).collect();
        for (block, is_rich) in msg.blocks.iter().zip(rich) {
            assert_eq!(block.typed_text().is_none(), is_rich);
        }
    }

    #[test]
    fn sanitize_block_strips_unexpected_markup() {
        let cleaned = sanitize_block("<p onclick=\"x()\">hi<img src=x></p>");
        assert_eq!(cleaned, "<p>hi</p>");
    }
}
