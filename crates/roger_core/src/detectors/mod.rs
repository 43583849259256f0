//! Pattern detectors.
//!
//! Independent, stateless classifiers over free text. Each is a pure
//! function: no detector mutates shared state, and all are safe to call in
//! parallel across sessions. A detector that finds nothing returns its zero
//! value rather than an error, so one family's failure never blocks the
//! others.

pub mod feeling;
pub mod local_context;
pub mod small_talk;
pub mod specialized;
pub mod stressor;
pub mod stressor_catalog;

pub use feeling::{detect_feeling, Emotion, FeelingDetection};
pub use local_context::{detect_local_context, local_response_line, LocalContextDetection, LocalTopic};
pub use small_talk::{detect_small_talk, is_bare_greeting, SmallTalkDetection, SmallTalkKind};
pub use specialized::{
    detect_specialized_topic, inject_safety_resource, resource_line, TopicDetection, TopicKind,
};
pub use stressor::{detect_stressors, primary_stressor, DetectedStressor};
pub use stressor_catalog::{lookup, AgeRange, Severity, Stressor, StressorCategory};
