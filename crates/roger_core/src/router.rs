//! Lane routing.
//!
//! Picks one of four processing lanes for an input, with a latency budget
//! and the subsystems to engage. Priority order, first match wins:
//! crisis, greeting, emotional, complex. The crisis check runs first and is
//! never skipped or delayed: crisis replies bypass the shared processing
//! hub entirely rather than queue behind memory/RAG/personality work.
//! Among non-crisis lanes the more specific classification wins, keeping
//! the fast path as wide as safely possible.

use tracing::debug;

use crate::config::PipelineConfig;
use crate::detectors::{
    detect_feeling, detect_small_talk, detect_specialized_topic, stressor, SmallTalkKind,
};
use crate::types::{Lane, RouteDecision, SubsystemId};

/// Route an input to a lane.
pub fn route(input: &str, history: &[&str], config: &PipelineConfig) -> RouteDecision {
    let decision = decide(input, history, config);
    debug!(
        lane = %decision.lane,
        budget_ms = decision.estimated_time_ms,
        "routed input"
    );
    decision
}

fn decide(input: &str, _history: &[&str], config: &PipelineConfig) -> RouteDecision {
    let trimmed = input.trim();

    // Empty input is non-fatal: neutral greeting fallback.
    if trimmed.is_empty() {
        return RouteDecision {
            lane: Lane::Greeting,
            estimated_time_ms: config.budgets.greeting_ms,
            subsystems: Vec::new(),
        };
    }

    // 1. Crisis dominates everything and cannot be preempted.
    let topic = detect_specialized_topic(trimmed);
    if topic.is_crisis() {
        return RouteDecision {
            lane: Lane::Crisis,
            estimated_time_ms: config.budgets.crisis_ms,
            subsystems: vec![SubsystemId::CrisisResponse],
        };
    }

    let feeling = detect_feeling(trimmed);
    let stressor_conf = stressor::top_confidence(trimmed);
    let emotional_signal =
        feeling.confidence > config.thresholds.emotional || stressor_conf > config.thresholds.emotional;

    // 2. Short, no-content small talk with no emotional signal: minimal
    // path. Weather/sports chatter stays out; the complex lane's local-
    // context chain gives those a better answer than a canned greeting.
    let small_talk = matches!(
        detect_small_talk(trimmed).kind,
        Some(
            SmallTalkKind::Greeting
                | SmallTalkKind::HowAreYou
                | SmallTalkKind::Thanks
                | SmallTalkKind::Farewell
        )
    );
    if trimmed.len() < config.greeting_max_len && small_talk && !emotional_signal {
        return RouteDecision {
            lane: Lane::Greeting,
            estimated_time_ms: config.budgets.greeting_ms,
            subsystems: Vec::new(),
        };
    }

    // 3. Emotional lane when either detector clears the threshold.
    if emotional_signal {
        return RouteDecision {
            lane: Lane::Emotional,
            estimated_time_ms: config.budgets.emotional_ms,
            subsystems: vec![
                SubsystemId::Emotion,
                SubsystemId::Memory,
                SubsystemId::Personality,
            ],
        };
    }

    // 4. Everything else: full composition path.
    RouteDecision {
        lane: Lane::Complex,
        estimated_time_ms: config.budgets.complex_ms,
        subsystems: vec![
            SubsystemId::Emotion,
            SubsystemId::Memory,
            SubsystemId::Personality,
            SubsystemId::Rag,
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PipelineConfig {
        PipelineConfig::default()
    }

    fn lane_for(input: &str) -> Lane {
        route(input, &[], &config()).lane
    }

    #[test]
    fn test_crisis_routes_crisis() {
        assert_eq!(lane_for("I want to kill myself"), Lane::Crisis);
        assert_eq!(lane_for("I've been thinking about suicide"), Lane::Crisis);
    }

    #[test]
    fn test_crisis_dominates_other_content() {
        // Co-occurring eating-disorder keywords must not mask the crisis
        assert_eq!(
            lane_for("I've been restricting my eating and I want to kill myself"),
            Lane::Crisis
        );
        // Even a short greeting-shaped message with a crisis keyword
        assert_eq!(lane_for("hi, I want to die"), Lane::Crisis);
    }

    #[test]
    fn test_bare_greeting_routes_greeting() {
        let d = route("hi", &[], &config());
        assert_eq!(d.lane, Lane::Greeting);
        assert!(d.subsystems.is_empty());
        assert_eq!(d.estimated_time_ms, 400);
    }

    #[test]
    fn test_greeting_with_content_is_not_greeting() {
        assert_ne!(lane_for("hi, my boss keeps yelling at me"), Lane::Greeting);
    }

    #[test]
    fn test_short_small_talk_routes_greeting() {
        assert_eq!(lane_for("how are you?"), Lane::Greeting);
        assert_eq!(lane_for("thanks, that helps"), Lane::Greeting);
        assert_eq!(lane_for("ok bye"), Lane::Greeting);
    }

    #[test]
    fn test_weather_chatter_routes_complex() {
        assert_eq!(lane_for("sure is cold out today"), Lane::Complex);
    }

    #[test]
    fn test_emotional_routing() {
        let d = route(
            "My boss keeps yelling at me and I can't take it anymore",
            &[],
            &config(),
        );
        assert_eq!(d.lane, Lane::Emotional);
        assert!(d.subsystems.contains(&SubsystemId::Emotion));
        assert!(!d.subsystems.contains(&SubsystemId::Rag));
    }

    #[test]
    fn test_feeling_routes_emotional() {
        assert_eq!(
            lane_for("I've been so anxious and worried all week"),
            Lane::Emotional
        );
    }

    #[test]
    fn test_default_routes_complex() {
        let d = route(
            "Can you explain how therapy sessions usually go? I've never been before.",
            &[],
            &config(),
        );
        assert_eq!(d.lane, Lane::Complex);
        assert!(d.subsystems.contains(&SubsystemId::Rag));
        assert_eq!(d.estimated_time_ms, 800);
    }

    #[test]
    fn test_empty_input_neutral_fallback() {
        let d = route("   ", &[], &config());
        assert_eq!(d.lane, Lane::Greeting);
        assert!(d.subsystems.is_empty());
    }

    #[test]
    fn test_budget_ordering() {
        let c = config();
        let greeting = route("hi", &[], &c).estimated_time_ms;
        let emotional = route("I feel so anxious and worried", &[], &c).estimated_time_ms;
        let complex = route("Tell me about the waiting room process here.", &[], &c)
            .estimated_time_ms;
        assert!(greeting < emotional);
        assert!(emotional < complex);
    }
}
