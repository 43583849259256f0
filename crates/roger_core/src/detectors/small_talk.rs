//! Greeting and small-talk detection.
//!
//! Short, low-content messages take the minimal-processing path, so this
//! detector's job is recognizing them cheaply: bare greetings, "how are
//! you", thanks, farewells, and weather/sports chatter.

use serde::{Deserialize, Serialize};

/// Small-talk families the greeting lane handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmallTalkKind {
    Greeting,
    HowAreYou,
    Thanks,
    Farewell,
    Weather,
    Sports,
}

/// Result of small-talk detection.
#[derive(Debug, Clone, Serialize)]
pub struct SmallTalkDetection {
    pub detected: bool,
    pub kind: Option<SmallTalkKind>,
    pub matched: Option<&'static str>,
}

impl SmallTalkDetection {
    fn none() -> Self {
        Self {
            detected: false,
            kind: None,
            matched: None,
        }
    }

    fn hit(kind: SmallTalkKind, matched: &'static str) -> Self {
        Self {
            detected: true,
            kind: Some(kind),
            matched: Some(matched),
        }
    }
}

/// Bare greetings matched against the whole (trimmed) message, so that
/// "hi, my boss yells at me" does not count as a greeting.
const BARE_GREETINGS: &[&str] = &[
    "hi", "hello", "hey", "hiya", "howdy", "yo", "good morning", "good afternoon", "good evening",
    "hi there", "hello there", "hey there",
];

const HOW_ARE_YOU: &[&str] = &["how are you", "how's it going", "how are things", "what's up"];

const THANKS: &[&str] = &["thank you", "thanks", "appreciate it", "that helps"];

const FAREWELL: &[&str] = &["bye", "goodbye", "see you", "gotta go", "talk later"];

const WEATHER: &[&str] = &["weather", "raining", "snowing", "sunny", "cold out", "hot out"];

const SPORTS: &[&str] = &["game last night", "football", "baseball", "basketball", "playoffs"];

/// Detect small talk. Bare greetings require the whole message to match;
/// the other families use substring containment.
pub fn detect_small_talk(input: &str) -> SmallTalkDetection {
    let lower = input.trim().to_lowercase();
    let stripped = lower.trim_end_matches(['!', '.', '?', ',']);

    if let Some(g) = BARE_GREETINGS.iter().find(|g| stripped == **g) {
        return SmallTalkDetection::hit(SmallTalkKind::Greeting, g);
    }
    if let Some(m) = HOW_ARE_YOU.iter().find(|p| lower.contains(&***p)) {
        return SmallTalkDetection::hit(SmallTalkKind::HowAreYou, m);
    }
    if let Some(m) = THANKS.iter().find(|p| lower.contains(&***p)) {
        return SmallTalkDetection::hit(SmallTalkKind::Thanks, m);
    }
    if let Some(m) = FAREWELL.iter().find(|p| lower.contains(&***p)) {
        return SmallTalkDetection::hit(SmallTalkKind::Farewell, m);
    }
    if let Some(m) = WEATHER.iter().find(|p| lower.contains(&***p)) {
        return SmallTalkDetection::hit(SmallTalkKind::Weather, m);
    }
    if let Some(m) = SPORTS.iter().find(|p| lower.contains(&***p)) {
        return SmallTalkDetection::hit(SmallTalkKind::Sports, m);
    }

    SmallTalkDetection::none()
}

/// True when the message is a bare greeting eligible for the fast path.
pub fn is_bare_greeting(input: &str) -> bool {
    matches!(
        detect_small_talk(input).kind,
        Some(SmallTalkKind::Greeting)
    )
}
