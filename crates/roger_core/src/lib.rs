//! Roger response core.
//!
//! Routing, pattern detection, and repetition-safe response finishing for
//! the Roger waiting-room companion. Consumed in-process as a library; the
//! UI, session security, and retrieval backend live elsewhere and talk to
//! this crate through the collaborator traits.

pub mod collaborators;
pub mod config;
pub mod confidence;
pub mod detectors;
pub mod error;
pub mod finisher;
pub mod lanes;
pub mod pipeline;
pub mod pools;
pub mod repetition;
pub mod router;
pub mod session;
pub mod similarity;
pub mod types;

pub use collaborators::{ContextRetriever, NullRetriever, NullVoice, PersonalityVoice};
pub use config::PipelineConfig;
pub use error::RogerError;
pub use pipeline::{RogerPipeline, SAFE_FALLBACK_TEXT};
pub use session::ConversationLog;
pub use types::{Lane, Message, ResponseResult, Role, RouteDecision, SubsystemId};
