//! Parsing of the assistant's reply string.
//!
//! The backend channel is a single LLM-produced string; structured data
//! rides inside it as a delimited JSON island. This module pulls the island
//! out, decodes it (with a silent mock fallback on malformed JSON), and
//! hosts the lossy topic heuristics for draft markers and "see more"
//! refetches.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tracing::warn;

use coach_core::model::{Flashcard, StudySet};

use crate::mock::mock_catalog;

pub const ISLAND_OPEN: &str = "[STUDY_SETS_DATA]";
pub const ISLAND_CLOSE: &str = "[/STUDY_SETS_DATA]";

/// Placeholder when no draft-topic pattern matches.
pub const FALLBACK_TOPIC: &str = "Your Topic";

/// An assistant reply split around its (single) study-set island.
///
/// Only the first island is honored; any later occurrence stays in `trail`
/// as literal text. Renderers emit at most one card list per reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReply {
    pub lead: String,
    pub sets: Option<Vec<StudySet>>,
    pub trail: String,
}

impl ParsedReply {
    /// The visible text of the reply, island removed.
    #[must_use]
    pub fn visible_text(&self) -> String {
        let lead = self.lead.trim_end();
        let trail = self.trail.trim_start();
        if lead.is_empty() {
            trail.to_string()
        } else if trail.is_empty() {
            lead.to_string()
        } else {
            format!("{lead}\n\n{trail}")
        }
    }
}

/// Split a raw assistant reply around its study-set island, if any.
#[must_use]
pub fn parse_reply(raw: &str) -> ParsedReply {
    let Some(open) = raw.find(ISLAND_OPEN) else {
        return ParsedReply {
            lead: raw.to_string(),
            sets: None,
            trail: String::new(),
        };
    };
    let body_start = open + ISLAND_OPEN.len();
    let Some(close_rel) = raw[body_start..].find(ISLAND_CLOSE) else {
        // Unterminated island: treat the whole thing as text.
        return ParsedReply {
            lead: raw.to_string(),
            sets: None,
            trail: String::new(),
        };
    };
    let body = &raw[body_start..body_start + close_rel];
    let trail_start = body_start + close_rel + ISLAND_CLOSE.len();

    ParsedReply {
        lead: raw[..open].to_string(),
        sets: Some(decode_island(body)),
        trail: raw[trail_start..].to_string(),
    }
}

/// Decode the island JSON. Malformed payloads fall back to the mock
/// catalog without surfacing an error; an empty `studySets` array is valid
/// and yields zero sets.
#[must_use]
pub fn decode_island(json: &str) -> Vec<StudySet> {
    match serde_json::from_str::<IslandPayload>(json) {
        Ok(payload) => payload
            .study_sets
            .into_iter()
            .enumerate()
            .map(|(pos, set)| set.into_study_set(pos as u64))
            .collect(),
        Err(err) => {
            warn!(%err, "malformed study-set island, serving mock catalog");
            mock_catalog()
        }
    }
}

//
// ─── TOPIC HEURISTICS ──────────────────────────────────────────────────────────
//

static DRAFT_FOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[Open Flashcard Set Draft for (.+?)\]").unwrap()
});
static DRAFT_DASH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[Open Flashcard Set Draft\s*-\s*(.+?)\]").unwrap()
});
static DRAFT_BARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[Open Flashcard Set Draft\s+(.+?)\]").unwrap()
});

/// Pull the topic out of a draft-link marker, trying patterns from most to
/// least specific. This is a lossy heuristic, not a parser; unmatched
/// markers get [`FALLBACK_TOPIC`].
#[must_use]
pub fn extract_draft_topic(marker: &str) -> String {
    for pattern in [&*DRAFT_FOR, &*DRAFT_DASH, &*DRAFT_BARE] {
        if let Some(caps) = pattern.captures(marker) {
            let topic = caps[1].trim();
            if !topic.is_empty() {
                return topic.to_string();
            }
        }
    }
    FALLBACK_TOPIC.to_string()
}

static TOPIC_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)""#).unwrap());
static TOPIC_PREPOSITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:sets?|flashcards?|results?)\s+(?:for|about|on)\s+([^.!?\n:]+)").unwrap()
});
static TOPIC_ABOUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\babout\s+([^.!?\n]+)").unwrap());

/// Reconstruct a topic from a message's visible text for a "see more"
/// refetch. Same spirit as [`extract_draft_topic`]: best effort, with a
/// generic fallback.
#[must_use]
pub fn reconstruct_topic(visible_text: &str) -> String {
    for pattern in [&*TOPIC_QUOTED, &*TOPIC_PREPOSITION, &*TOPIC_ABOUT] {
        if let Some(caps) = pattern.captures(visible_text) {
            let topic = caps[1].trim();
            if !topic.is_empty() {
                return topic.to_string();
            }
        }
    }
    "my current topic".to_string()
}

//
// ─── WIRE TYPES ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IslandPayload {
    #[serde(default)]
    study_sets: Vec<IslandSet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IslandSet {
    title: String,
    #[serde(default)]
    card_count: u32,
    #[serde(default)]
    studiers_today: u32,
    #[serde(default)]
    flashcards: Vec<IslandCard>,
}

impl IslandSet {
    fn into_study_set(self, id: u64) -> StudySet {
        let flashcards: Vec<Flashcard> = self
            .flashcards
            .into_iter()
            .map(|card| Flashcard::new(card.term, card.definition))
            .collect();
        // The advertised count may exceed the embedded preview cards.
        let term_count = self.card_count.max(flashcards.len() as u32);
        StudySet {
            id,
            title: self.title,
            term_count,
            studiers_today: self.studiers_today,
            flashcards,
        }
    }
}

#[derive(Debug, Deserialize)]
struct IslandCard {
    #[serde(default)]
    term: String,
    #[serde(default)]
    definition: String,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
