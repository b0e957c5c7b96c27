//! Intent parsing: weather keyword detection, location phrase extraction and day selection
//!
//! The location phrase is the first `in` / `at` / `for` followed by a run of
//! letters, spaces, commas, hyphens and apostrophes. Any other character ends
//! the run, so `"weather in Area 51"` yields `"Area"`; that truncation is
//! intended heuristic behaviour. The words `today` and `tomorrow` also end
//! the run.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::alias::AliasTable;

/// Matched as case-insensitive whole words
const WEATHER_KEYWORDS: &[&str] = &[
    "weather",
    "temp",
    "temps",
    "temperature",
    "temperatures",
    "forecast",
    "forecasts",
    "climate",
];

/// Whole words that introduce a location phrase
const LOCATION_MARKERS: &[&str] = &["in", "at", "for"];

const DAY_WORDS: &[&str] = &["today", "tomorrow"];

/// Which day the user asked about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    #[default]
    Today,
    Tomorrow,
}

impl Day {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Day::Today => "today",
            Day::Tomorrow => "tomorrow",
        }
    }

    /// Days after today (0 for today)
    #[must_use]
    pub fn offset(self) -> usize {
        match self {
            Day::Today => 0,
            Day::Tomorrow => 1,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured weather request extracted from an utterance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Location phrase after alias folding, `None` when the user named no place
    pub city: Option<String>,
    pub day: Day,
}

/// Turns free text into an [`Intent`]
#[derive(Debug, Clone)]
pub struct IntentParser {
    aliases: Arc<AliasTable>,
}

impl IntentParser {
    pub fn new(aliases: Arc<AliasTable>) -> Self {
        Self { aliases }
    }

    /// `None` when the utterance is not about the weather
    pub fn parse(&self, utterance: &str) -> Option<Intent> {
        if !is_weather_related(utterance) {
            debug!("No weather keyword in utterance");
            return None;
        }

        let day = detect_day(utterance);
        let city = extract_location(utterance).map(|phrase| match self.aliases.lookup(&phrase) {
            Some(canonical) => {
                debug!("Alias '{}' folded to '{}'", phrase, canonical);
                canonical.to_string()
            }
            None => phrase,
        });

        let intent = Intent { city, day };
        debug!("Parsed intent: {:?}", intent);
        Some(intent)
    }
}

/// True when any whole word is a weather keyword, ignoring case
#[must_use]
pub fn is_weather_related(utterance: &str) -> bool {
    words(utterance).iter().any(|(_, word)| {
        WEATHER_KEYWORDS
            .iter()
            .any(|keyword| word.eq_ignore_ascii_case(keyword))
    })
}

/// `Tomorrow` when the whole word "tomorrow" appears anywhere, else `Today`
#[must_use]
pub fn detect_day(utterance: &str) -> Day {
    if words(utterance)
        .iter()
        .any(|(_, word)| word.eq_ignore_ascii_case("tomorrow"))
    {
        Day::Tomorrow
    } else {
        Day::Today
    }
}

/// First non-empty location phrase, in original casing
#[must_use]
pub fn extract_location(utterance: &str) -> Option<String> {
    words(utterance)
        .into_iter()
        .filter(|(_, word)| {
            LOCATION_MARKERS
                .iter()
                .any(|marker| word.eq_ignore_ascii_case(marker))
        })
        .find_map(|(start, word)| {
            let rest = &utterance[start + word.len()..];
            if !rest.starts_with(char::is_whitespace) {
                return None;
            }
            capture_phrase(rest)
        })
}

fn capture_phrase(rest: &str) -> Option<String> {
    let run_end = rest.find(|c: char| !is_phrase_char(c)).unwrap_or(rest.len());

    let tokens: Vec<&str> = rest[..run_end]
        .split_whitespace()
        .take_while(|token| !is_day_word(token.trim_matches(is_separator)))
        .collect();

    let phrase = tokens.join(" ");
    let phrase = phrase.trim_matches(|c: char| c.is_whitespace() || is_separator(c));

    if phrase.is_empty() {
        None
    } else {
        Some(phrase.to_string())
    }
}

fn is_phrase_char(c: char) -> bool {
    c.is_alphabetic() || c.is_whitespace() || is_separator(c)
}

fn is_separator(c: char) -> bool {
    matches!(c, ',' | '-' | '\'' | '\u{2019}')
}

fn is_day_word(token: &str) -> bool {
    DAY_WORDS.iter().any(|day| token.eq_ignore_ascii_case(day))
}

/// Alphanumeric runs with their byte offsets
fn words(text: &str) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut start = None;

    for (idx, ch) in text.char_indices() {
        if ch.is_alphanumeric() {
            start.get_or_insert(idx);
        } else if let Some(s) = start.take() {
            out.push((s, &text[s..idx]));
        }
    }
    if let Some(s) = start {
        out.push((s, &text[s..]));
    }
    out
}
