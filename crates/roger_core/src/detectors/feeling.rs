//! Feeling/emotion detection.
//!
//! Maps free text onto a small set of emotion families via keyword
//! matching. Confidence follows the shared topic formula; intensity
//! modifiers ("extremely", "really", ...) add a fixed boost but the cap
//! still holds.

use serde::{Deserialize, Serialize};

use crate::confidence::{self, TOPIC_WEIGHTS};

/// Emotion families Roger reflects back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Anxious,
    Sad,
    Angry,
    Overwhelmed,
    Lonely,
    Fearful,
    Hopeful,
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Anxious => "anxious",
            Self::Sad => "sad",
            Self::Angry => "angry",
            Self::Overwhelmed => "overwhelmed",
            Self::Lonely => "lonely",
            Self::Fearful => "fearful",
            Self::Hopeful => "hopeful",
        };
        write!(f, "{}", s)
    }
}

/// Result of feeling detection.
#[derive(Debug, Clone, Serialize)]
pub struct FeelingDetection {
    pub detected: bool,
    pub emotion: Option<Emotion>,
    pub confidence: f64,
    pub matched_keywords: Vec<&'static str>,
}

impl FeelingDetection {
    fn none() -> Self {
        Self {
            detected: false,
            emotion: None,
            confidence: 0.0,
            matched_keywords: Vec::new(),
        }
    }
}

const INTENSITY_MODIFIERS: &[&str] = &["extremely", "really", "so ", "very", "incredibly", "severe"];
const INTENSITY_BOOST: f64 = 0.1;

/// (emotion, keyword family) in evaluation order. First family with the
/// most matches wins; ties go to the earlier family.
const EMOTION_KEYWORDS: &[(Emotion, &[&str])] = &[
    (
        Emotion::Anxious,
        &["anxious", "anxiety", "nervous", "worried", "on edge", "panicky", "racing thoughts"],
    ),
    (
        Emotion::Sad,
        &["sad", "down", "depressed", "crying", "tearful", "empty", "miserable"],
    ),
    (
        Emotion::Angry,
        &["angry", "furious", "mad at", "frustrated", "irritated", "fed up"],
    ),
    (
        Emotion::Overwhelmed,
        &["overwhelmed", "too much", "can't keep up", "drowning", "piling up", "burned out"],
    ),
    (
        Emotion::Lonely,
        &["lonely", "alone", "isolated", "no one understands", "left out"],
    ),
    (
        Emotion::Fearful,
        &["scared", "afraid", "terrified", "fear", "dread"],
    ),
    (
        Emotion::Hopeful,
        &["hopeful", "better lately", "looking forward", "optimistic", "improving"],
    ),
];

/// Detect the dominant feeling in an input.
pub fn detect_feeling(input: &str) -> FeelingDetection {
    let lower = input.to_lowercase();

    let mut best: Option<(Emotion, Vec<&'static str>)> = None;
    for (emotion, keywords) in EMOTION_KEYWORDS {
        let matched: Vec<&'static str> = keywords
            .iter()
            .filter(|k| lower.contains(&***k))
            .copied()
            .collect();
        if matched.is_empty() {
            continue;
        }
        let better = match &best {
            Some((_, prev)) => matched.len() > prev.len(),
            None => true,
        };
        if better {
            best = Some((*emotion, matched));
        }
    }

    let Some((emotion, matched)) = best else {
        return FeelingDetection::none();
    };

    let mut conf = confidence::from_match_count(matched.len(), TOPIC_WEIGHTS);
    if INTENSITY_MODIFIERS.iter().any(|m| lower.contains(m)) {
        conf = (conf + INTENSITY_BOOST).min(TOPIC_WEIGHTS.cap);
    }

    FeelingDetection {
        detected: true,
        emotion: Some(emotion),
        confidence: conf,
        matched_keywords: matched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_anxious() {
        let d = detect_feeling("I've been so nervous and worried all week");
        assert!(d.detected);
        assert_eq!(d.emotion, Some(Emotion::Anxious));
        assert!(d.matched_keywords.contains(&"worried"));
    }

    #[test]
    fn test_no_emotion() {
        let d = detect_feeling("what time does the session start");
        assert!(!d.detected);
        assert_eq!(d.emotion, None);
        assert_relative_eq!(d.confidence, 0.0);
    }

    #[test]
    fn test_intensity_boost() {
        let plain = detect_feeling("I feel sad");
        let intense = detect_feeling("I feel extremely sad");
        assert!(intense.confidence > plain.confidence);
    }

    #[test]
    fn test_most_matches_wins() {
        // Two overwhelmed keywords against one sad keyword
        let d = detect_feeling("everything is too much, work keeps piling up and I feel down");
        assert_eq!(d.emotion, Some(Emotion::Overwhelmed));
    }

    #[test]
    fn test_confidence_capped() {
        let d = detect_feeling(
            "I'm extremely anxious, nervous, worried, on edge and panicky with racing thoughts",
        );
        assert!(d.confidence <= 0.9);
    }

    #[test]
    fn test_hopeful_detected() {
        let d = detect_feeling("honestly I've been feeling better lately and looking forward to this");
        assert_eq!(d.emotion, Some(Emotion::Hopeful));
    }
}
