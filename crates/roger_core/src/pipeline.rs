//! The response pipeline.
//!
//! One entry point per user turn: route, execute the lane, finish the
//! draft, time the whole thing. This is also the outermost error boundary:
//! whatever goes wrong inside, the caller gets a plausible sentence back,
//! never an error and never an empty string. Crisis-path failures are the
//! one category escalated loudly in the log, since silent failure on crisis
//! detection is the worst bug this system can have.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error};

use crate::collaborators::{ContextRetriever, NullRetriever, NullVoice, PersonalityVoice};
use crate::config::PipelineConfig;
use crate::detectors::detect_specialized_topic;
use crate::finisher;
use crate::lanes::{self, LaneOutcome};
use crate::router::route;
use crate::types::{Lane, ResponseResult};

/// Fixed reply for total pipeline failure. Low confidence, `Fallback` lane.
pub const SAFE_FALLBACK_TEXT: &str = "I'm here to listen. What would you like to share?";
const FALLBACK_CONFIDENCE: f64 = 0.2;

/// The Roger response pipeline.
///
/// Holds the configuration and collaborator handles; all per-turn state
/// lives on the stack, so one pipeline serves any number of independent
/// sessions concurrently.
pub struct RogerPipeline {
    config: PipelineConfig,
    retriever: Arc<dyn ContextRetriever>,
    voice: Arc<dyn PersonalityVoice>,
}

impl Default for RogerPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl RogerPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            retriever: Arc::new(NullRetriever),
            voice: Arc::new(NullVoice),
        }
    }

    pub fn with_retriever(mut self, retriever: Arc<dyn ContextRetriever>) -> Self {
        self.retriever = retriever;
        self
    }

    pub fn with_voice(mut self, voice: Arc<dyn PersonalityVoice>) -> Self {
        self.voice = voice;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Respond to one user turn with ambient randomness.
    pub async fn respond(&self, input: &str, history: &[&str]) -> ResponseResult {
        let mut rng = StdRng::from_entropy();
        self.respond_with_rng(input, history, &mut rng).await
    }

    /// Respond with a caller-supplied randomness source, so tests can seed
    /// a `StdRng` and get deterministic pool picks.
    pub async fn respond_with_rng(
        &self,
        input: &str,
        history: &[&str],
        rng: &mut (impl Rng + Send),
    ) -> ResponseResult {
        let started = Instant::now();
        let is_crisis_path = detect_specialized_topic(input).is_crisis();

        match self.respond_inner(input, history, rng).await {
            Ok(mut result) => {
                result.processing_time_ms = started.elapsed().as_millis() as u64;
                result
            }
            Err(e) => {
                if is_crisis_path {
                    error!(error = %e, "CRISIS-PATH pipeline failure; user received generic fallback");
                } else {
                    error!(error = %e, "pipeline failure; user received generic fallback");
                }
                ResponseResult {
                    text: SAFE_FALLBACK_TEXT.to_string(),
                    processing_time_ms: started.elapsed().as_millis() as u64,
                    systems_engaged: Vec::new(),
                    confidence: FALLBACK_CONFIDENCE,
                    route_type: Lane::Fallback,
                    crisis_detected: is_crisis_path,
                }
            }
        }
    }

    async fn respond_inner(
        &self,
        input: &str,
        history: &[&str],
        rng: &mut (impl Rng + Send),
    ) -> anyhow::Result<ResponseResult> {
        let decision = route(input, history, &self.config);
        let topic = detect_specialized_topic(input);

        let outcome: LaneOutcome = match decision.lane {
            Lane::Crisis => lanes::execute_crisis(&topic, rng),
            Lane::Greeting => lanes::execute_greeting(input, history.is_empty(), rng),
            Lane::Emotional => {
                lanes::execute_emotional(input, self.config.thresholds.primary_stressor, rng)
            }
            Lane::Complex | Lane::Fallback => {
                lanes::execute_complex(
                    input,
                    self.retriever.as_ref(),
                    self.voice.as_ref(),
                    self.config.retrieval_timeout_ms(),
                    rng,
                )
                .await
            }
        };

        let text = finisher::finish(&outcome.draft, &topic);

        debug!(
            lane = %decision.lane,
            confidence = outcome.confidence,
            engaged = ?outcome.engaged,
            "turn finished"
        );

        Ok(ResponseResult {
            text,
            processing_time_ms: 0, // stamped by the caller
            systems_engaged: outcome.engaged.iter().map(|s| s.to_string()).collect(),
            confidence: outcome.confidence,
            route_type: decision.lane,
            crisis_detected: topic.is_crisis(),
        })
    }
}
