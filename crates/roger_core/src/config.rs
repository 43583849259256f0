//! Pipeline configuration.
//!
//! Budgets and thresholds for routing and detection. Loadable from a TOML
//! file; every field has a default so a missing or partial file still yields
//! a working pipeline.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Lane latency budgets in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneBudgets {
    /// Crisis bypass path. Kept below every other lane so a crisis reply is
    /// never queued behind memory/RAG/personality composition.
    #[serde(default = "default_crisis_ms")]
    pub crisis_ms: u64,
    #[serde(default = "default_greeting_ms")]
    pub greeting_ms: u64,
    #[serde(default = "default_emotional_ms")]
    pub emotional_ms: u64,
    #[serde(default = "default_complex_ms")]
    pub complex_ms: u64,
}

fn default_crisis_ms() -> u64 {
    300
}
fn default_greeting_ms() -> u64 {
    400
}
fn default_emotional_ms() -> u64 {
    600
}
fn default_complex_ms() -> u64 {
    800
}

impl Default for LaneBudgets {
    fn default() -> Self {
        Self {
            crisis_ms: default_crisis_ms(),
            greeting_ms: default_greeting_ms(),
            emotional_ms: default_emotional_ms(),
            complex_ms: default_complex_ms(),
        }
    }
}

/// Detection thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thresholds {
    /// Feeling/stressor confidence above which a turn routes Emotional.
    #[serde(default = "default_emotional_threshold")]
    pub emotional: f64,
    /// Precision bar for acting on a single stressor match.
    #[serde(default = "default_primary_stressor_threshold")]
    pub primary_stressor: f64,
}

fn default_emotional_threshold() -> f64 {
    0.5
}
fn default_primary_stressor_threshold() -> f64 {
    crate::detectors::stressor::PRIMARY_STRESSOR_THRESHOLD
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            emotional: default_emotional_threshold(),
            primary_stressor: default_primary_stressor_threshold(),
        }
    }
}

/// Full pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub budgets: LaneBudgets,

    #[serde(default)]
    pub thresholds: Thresholds,

    /// Inputs shorter than this may take the greeting fast path.
    #[serde(default = "default_greeting_max_len")]
    pub greeting_max_len: usize,
}

fn default_greeting_max_len() -> usize {
    50
}

// Hand-written: the serde field defaults only apply during deserialization,
// and a derived Default would zero greeting_max_len and close the fast path.
impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            budgets: LaneBudgets::default(),
            thresholds: Thresholds::default(),
            greeting_max_len: default_greeting_max_len(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Retrieval collaborator's share of the complex-lane budget.
    /// On timeout the lane falls back to the non-retrieval chain.
    pub fn retrieval_timeout_ms(&self) -> u64 {
        self.budgets.complex_ms / 2
    }
}
