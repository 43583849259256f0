//! Lane executors.
//!
//! One orchestration function per lane, each producing a draft reply plus
//! metadata about which subsystems actually contributed. The complex lane
//! composes collaborators through a single prioritized fallback chain and
//! takes the FIRST non-empty result; outputs are never stacked on top of
//! each other, which is how replies end up confused and self-contradicting.

use rand::Rng;
use std::time::Duration;
use tracing::warn;

use crate::collaborators::{ContextRetriever, PersonalityVoice};
use crate::error::RogerError;
use crate::detectors::{
    detect_feeling, detect_local_context, detect_small_talk, local_response_line,
    primary_stressor, SmallTalkKind, TopicDetection,
};
use crate::pools;
use crate::types::{Lane, SubsystemId};

/// A lane's draft plus execution metadata.
#[derive(Debug, Clone)]
pub struct LaneOutcome {
    pub draft: String,
    pub engaged: Vec<SubsystemId>,
    pub confidence: f64,
}

/// Crisis lane: bypasses every other subsystem. The empathy line comes from
/// the crisis pool; the finisher appends the 988/911 resource text.
pub fn execute_crisis(topic: &TopicDetection, rng: &mut impl Rng) -> LaneOutcome {
    let line = pools::pick(pools::CRISIS_POOL, rng);
    LaneOutcome {
        draft: line.to_string(),
        engaged: vec![SubsystemId::CrisisResponse],
        // Floor at 0.95: a crisis reply is never presented as tentative.
        confidence: topic.confidence.max(0.95),
    }
}

/// Greeting lane: minimal processing, pool pick, no collaborators.
pub fn execute_greeting(input: &str, first_turn: bool, rng: &mut impl Rng) -> LaneOutcome {
    let small_talk = detect_small_talk(input);
    let pool = match small_talk.kind {
        Some(SmallTalkKind::HowAreYou) => pools::HOW_ARE_YOU_POOL,
        Some(SmallTalkKind::Thanks) => pools::THANKS_POOL,
        Some(SmallTalkKind::Farewell) => pools::FAREWELL_POOL,
        _ if first_turn => pools::GREETING_FIRST_POOL,
        _ => pools::GREETING_RETURN_POOL,
    };
    LaneOutcome {
        draft: pools::pick(pool, rng).to_string(),
        engaged: Vec::new(),
        confidence: 0.9,
    }
}

/// Emotional lane: stressor acknowledgment first, feeling reflection
/// second, listening prompt last.
pub fn execute_emotional(input: &str, primary_threshold: f64, rng: &mut impl Rng) -> LaneOutcome {
    if let Some(stressor) = primary_stressor(input, primary_threshold) {
        let template = pools::pick(pools::STRESSOR_ACK_POOL, rng);
        let draft = template.replace("{name}", &stressor.name.to_lowercase());
        return LaneOutcome {
            draft,
            engaged: vec![SubsystemId::Emotion],
            confidence: stressor.confidence,
        };
    }

    let feeling = detect_feeling(input);
    if let Some(emotion) = feeling.emotion {
        let draft = pools::pick(pools::emotion_pool(emotion), rng).to_string();
        return LaneOutcome {
            draft,
            engaged: vec![SubsystemId::Emotion],
            confidence: feeling.confidence,
        };
    }

    LaneOutcome {
        draft: pools::pick(pools::LISTENING_POOL, rng).to_string(),
        engaged: Vec::new(),
        confidence: 0.4,
    }
}

/// Complex lane: retrieval under a timeout, then the single fallback chain.
///
/// Chain order: emotion-tailored response (optionally weaving one retrieval
/// snippet) → personality insight → local-context response → generic
/// listening prompt. First non-empty wins.
pub async fn execute_complex(
    input: &str,
    retriever: &dyn ContextRetriever,
    voice: &dyn PersonalityVoice,
    retrieval_timeout_ms: u64,
    rng: &mut impl Rng,
) -> LaneOutcome {
    let snippets = retrieve_with_timeout(input, retriever, retrieval_timeout_ms).await;

    let feeling = detect_feeling(input);
    if let Some(emotion) = feeling.emotion {
        let mut draft = pools::pick(pools::emotion_pool(emotion), rng).to_string();
        let mut engaged = vec![SubsystemId::Emotion];
        if let Some(snippet) = snippets.first() {
            draft.push(' ');
            draft.push_str(snippet);
            engaged.push(SubsystemId::Rag);
        }
        return LaneOutcome {
            draft,
            engaged,
            confidence: feeling.confidence,
        };
    }

    if let Some(insight) = voice.personality_insight(input) {
        if !insight.trim().is_empty() {
            return LaneOutcome {
                draft: insight,
                engaged: vec![SubsystemId::Personality],
                confidence: 0.6,
            };
        }
    }

    let local = detect_local_context(input);
    if let Some(line) = local_response_line(&local) {
        return LaneOutcome {
            draft: line,
            engaged: Vec::new(),
            confidence: 0.6,
        };
    }

    LaneOutcome {
        draft: pools::pick(pools::LISTENING_POOL, rng).to_string(),
        engaged: Vec::new(),
        confidence: 0.4,
    }
}

/// Retrieval under its share of the lane budget. Timeout or failure
/// degrades to an empty snippet list; it never fails the turn.
async fn retrieve_with_timeout(
    input: &str,
    retriever: &dyn ContextRetriever,
    timeout_ms: u64,
) -> Vec<String> {
    let budget = Duration::from_millis(timeout_ms);
    match tokio::time::timeout(budget, retriever.retrieve_context(input, Lane::Complex)).await {
        Ok(Ok(snippets)) => snippets,
        Ok(Err(e)) => {
            let err = RogerError::Collaborator(e.to_string());
            warn!(error = %err, "continuing without retrieved context");
            Vec::new()
        }
        Err(_) => {
            let err = RogerError::CollaboratorTimeout(timeout_ms);
            warn!(error = %err, "continuing without retrieved context");
            Vec::new()
        }
    }
}
