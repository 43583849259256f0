//! Specialized-topic detection and safety resources.
//!
//! High-risk topics (crisis, eating disorder, gambling, substance abuse,
//! meaning-focused) carry mandatory safety content. The crisis family is
//! evaluated unconditionally FIRST and overrides every other family: an
//! earlier design checked it fourth in a mutually-exclusive chain, which
//! let "restricting my eating and I want to kill myself" classify as
//! eating_disorder and never reach the crisis path. The remaining families
//! keep their fixed mutually-exclusive order.

use serde::{Deserialize, Serialize};

use crate::confidence::{self, TOPIC_WEIGHTS};

/// Specialized topic families, plus General for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicKind {
    Crisis,
    EatingDisorder,
    Gambling,
    SubstanceAbuse,
    MeaningFocused,
    General,
}

impl std::fmt::Display for TopicKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Crisis => "crisis",
            Self::EatingDisorder => "eating_disorder",
            Self::Gambling => "gambling",
            Self::SubstanceAbuse => "substance_abuse",
            Self::MeaningFocused => "meaning_focused",
            Self::General => "general",
        };
        write!(f, "{}", s)
    }
}

/// Result of specialized-topic detection.
#[derive(Debug, Clone, Serialize)]
pub struct TopicDetection {
    pub detected: bool,
    pub topic: TopicKind,
    pub confidence: f64,
    pub matched_keywords: Vec<&'static str>,
    pub requires_specialized_processing: bool,
}

impl TopicDetection {
    fn general() -> Self {
        Self {
            detected: false,
            topic: TopicKind::General,
            confidence: 0.0,
            matched_keywords: Vec::new(),
            requires_specialized_processing: false,
        }
    }

    pub fn is_crisis(&self) -> bool {
        self.topic == TopicKind::Crisis
    }
}

// ============================================================================
// Keyword families
// ============================================================================

/// Self-harm / suicide / immediate danger. Matches here dominate all other
/// families unconditionally.
const CRISIS_KEYWORDS: &[&str] = &[
    "kill myself",
    "suicide",
    "suicidal",
    "end my life",
    "want to die",
    "better off dead",
    "hurt myself",
    "self-harm",
    "self harm",
    "no reason to live",
    "end it all",
];

const EATING_DISORDER_KEYWORDS: &[&str] = &[
    "eating disorder",
    "restricting my eating",
    "not eating",
    "starving myself",
    "purging",
    "binge eating",
    "bingeing",
    "anorexia",
    "bulimia",
    "throwing up after meals",
    "counting every calorie",
];

const GAMBLING_KEYWORDS: &[&str] = &[
    "gambling",
    "casino",
    "betting",
    "sports bets",
    "slot machines",
    "lost it all on a bet",
    "poker debts",
    "scratch-offs",
];

const SUBSTANCE_KEYWORDS: &[&str] = &[
    "drinking too much",
    "can't stop drinking",
    "alcohol",
    "getting high",
    "drugs",
    "pills to get through",
    "opioid",
    "relapse",
    "relapsed",
    "overdose",
    "using again",
];

const MEANING_KEYWORDS: &[&str] = &[
    "what's the point",
    "whats the point",
    "meaningless",
    "no purpose",
    "why am i even here",
    "nothing matters",
    "life feels empty",
];

/// Detect a specialized topic in an input.
///
/// Crisis first, unconditionally; then the fixed mutually-exclusive chain
/// eating_disorder → gambling → substance_abuse → meaning_focused.
pub fn detect_specialized_topic(input: &str) -> TopicDetection {
    let lower = input.to_lowercase();

    // Crisis overrides everything, including co-occurring families.
    let crisis_matches = matched_keywords(&lower, CRISIS_KEYWORDS);
    if !crisis_matches.is_empty() {
        let conf = scored(&crisis_matches, input.len());
        return TopicDetection {
            detected: true,
            topic: TopicKind::Crisis,
            confidence: conf,
            matched_keywords: crisis_matches,
            // Crisis always requires the specialized path, whatever the score.
            requires_specialized_processing: true,
        };
    }

    let families: &[(TopicKind, &[&str])] = &[
        (TopicKind::EatingDisorder, EATING_DISORDER_KEYWORDS),
        (TopicKind::Gambling, GAMBLING_KEYWORDS),
        (TopicKind::SubstanceAbuse, SUBSTANCE_KEYWORDS),
        (TopicKind::MeaningFocused, MEANING_KEYWORDS),
    ];

    for (topic, keywords) in families {
        let matched = matched_keywords(&lower, keywords);
        if matched.is_empty() {
            continue;
        }
        let conf = scored(&matched, input.len());
        return TopicDetection {
            detected: true,
            topic: *topic,
            confidence: conf,
            matched_keywords: matched,
            requires_specialized_processing: conf > 0.5,
        };
    }

    TopicDetection::general()
}

fn matched_keywords(lower: &str, keywords: &'static [&'static str]) -> Vec<&'static str> {
    keywords
        .iter()
        .filter(|k| lower.contains(&***k))
        .copied()
        .collect()
}

/// min(0.4 + matches*0.2, 0.9), +0.1 for inputs over 100 chars, still
/// capped at 0.9. This detector never reaches 1.0 on its own.
fn scored(matched: &[&'static str], input_len: usize) -> f64 {
    let base = confidence::from_match_count(matched.len(), TOPIC_WEIGHTS);
    confidence::with_length_bonus(base, input_len, TOPIC_WEIGHTS)
}

// ============================================================================
// Safety resources
// ============================================================================

/// Resource line for a topic, with the indicator substring the injector
/// uses as its idempotence guard.
struct SafetyResource {
    topic: TopicKind,
    line: &'static str,
    /// If the draft already contains this, the line is not appended again.
    indicator: &'static str,
}

const SAFETY_RESOURCES: &[SafetyResource] = &[
    SafetyResource {
        topic: TopicKind::Crisis,
        line: "If you're in immediate danger, please call 911. You can also call or text 988, the Suicide & Crisis Lifeline, any time.",
        indicator: "988",
    },
    SafetyResource {
        topic: TopicKind::EatingDisorder,
        line: "The NEDA Helpline is there for eating concerns: 1-800-931-2237.",
        indicator: "1-800-931-2237",
    },
    SafetyResource {
        topic: TopicKind::Gambling,
        line: "The National Problem Gambling Helpline is available 24/7: 1-800-522-4700.",
        indicator: "1-800-522-4700",
    },
    SafetyResource {
        topic: TopicKind::SubstanceAbuse,
        line: "SAMHSA's National Helpline offers free, confidential support: 1-800-662-4357.",
        indicator: "1-800-662-4357",
    },
];

/// The safety resource line for a topic, if any.
pub fn resource_line(topic: TopicKind) -> Option<&'static str> {
    SAFETY_RESOURCES
        .iter()
        .find(|r| r.topic == topic)
        .map(|r| r.line)
}

/// Append the topic's safety resource to a draft, once.
///
/// Idempotent: the indicator substring (the hotline number) guards against
/// duplicate resource lines across turns or repeated finishing passes.
pub fn inject_safety_resource(draft: &str, detection: &TopicDetection) -> String {
    if !detection.detected || !detection.requires_specialized_processing {
        return draft.to_string();
    }

    let Some(resource) = SAFETY_RESOURCES.iter().find(|r| r.topic == detection.topic) else {
        return draft.to_string();
    };

    if draft.contains(resource.indicator) {
        return draft.to_string();
    }

    if draft.is_empty() {
        resource.line.to_string()
    } else {
        format!("{} {}", draft.trim_end(), resource.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crisis_detected() {
        let d = detect_specialized_topic("I want to kill myself");
        assert!(d.detected);
        assert_eq!(d.topic, TopicKind::Crisis);
        assert!(d.requires_specialized_processing);
    }

    #[test]
    fn test_crisis_overrides_eating_disorder() {
        // The co-occurrence case the old elif-chain got wrong
        let d = detect_specialized_topic(
            "I've been restricting my eating and I want to kill myself",
        );
        assert_eq!(d.topic, TopicKind::Crisis);
        assert!(d.requires_specialized_processing);
    }

    #[test]
    fn test_crisis_overrides_every_family() {
        let inputs = [
            "gambling all night and I want to die",
            "drinking too much lately, no reason to live",
            "what's the point, I might end it all",
        ];
        for input in inputs {
            assert_eq!(
                detect_specialized_topic(input).topic,
                TopicKind::Crisis,
                "input: {}",
                input
            );
        }
    }

    #[test]
    fn test_family_order() {
        // Eating disorder checked before substance abuse
        let d = detect_specialized_topic("not eating much and drinking too much");
        assert_eq!(d.topic, TopicKind::EatingDisorder);
    }

    #[test]
    fn test_general_when_nothing_matches() {
        let d = detect_specialized_topic("my boss keeps yelling at me");
        assert!(!d.detected);
        assert_eq!(d.topic, TopicKind::General);
        assert!(!d.requires_specialized_processing);
    }

    #[test]
    fn test_confidence_capped_at_0_9() {
        let d = detect_specialized_topic(
            "suicidal thoughts, I want to die, no reason to live, thinking about how to end my life because everything hurts",
        );
        assert!(d.confidence <= 0.9);
        assert!(d.confidence > 0.0);
    }

    #[test]
    fn test_length_bonus() {
        let short = detect_specialized_topic("gambling again");
        let long = detect_specialized_topic(
            "gambling again even though I promised myself I would stop after last month, it has been eating into the grocery money",
        );
        assert!(long.confidence > short.confidence);
    }

    #[test]
    fn test_single_match_scores_0_6() {
        let d = detect_specialized_topic("gambling");
        assert!(d.requires_specialized_processing);
        assert!((d.confidence - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_injection_appends_once() {
        let d = detect_specialized_topic("I want to kill myself");
        let once = inject_safety_resource("I'm here with you.", &d);
        assert!(once.contains("988"));
        assert!(once.contains("911"));

        let twice = inject_safety_resource(&once, &d);
        assert_eq!(once, twice);
        assert_eq!(twice.matches("988").count(), 1);
    }

    #[test]
    fn test_injection_skipped_for_general() {
        let d = detect_specialized_topic("tell me about the weather");
        let out = inject_safety_resource("It's a nice day.", &d);
        assert_eq!(out, "It's a nice day.");
    }

    #[test]
    fn test_injection_on_empty_draft() {
        let d = detect_specialized_topic("I want to kill myself");
        let out = inject_safety_resource("", &d);
        assert!(out.contains("988"));
    }

    #[test]
    fn test_resource_lines_exist_for_risk_topics() {
        assert!(resource_line(TopicKind::Crisis).is_some());
        assert!(resource_line(TopicKind::EatingDisorder).is_some());
        assert!(resource_line(TopicKind::Gambling).is_some());
        assert!(resource_line(TopicKind::SubstanceAbuse).is_some());
        assert!(resource_line(TopicKind::MeaningFocused).is_none());
        assert!(resource_line(TopicKind::General).is_none());
    }
}
