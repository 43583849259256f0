//! Shared types for the Roger response core.
//!
//! Everything here is plain data: routing decisions, detector outputs, and
//! the final response envelope. Nothing in this module mutates shared state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Conversation
// ============================================================================

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One immutable unit of conversation.
///
/// Messages are created once per turn and appended to the session log;
/// they are never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub role: Role,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(text: &str) -> Self {
        Self {
            text: text.to_string(),
            role: Role::User,
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(text: &str) -> Self {
        Self {
            text: text.to_string(),
            role: Role::Assistant,
            timestamp: Utc::now(),
        }
    }
}

// ============================================================================
// Routing
// ============================================================================

/// Processing lane for a user turn.
///
/// `Fallback` is never chosen by the router; it marks a reply produced by
/// the outermost error boundary after a total pipeline failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lane {
    Crisis,
    Greeting,
    Emotional,
    Complex,
    Fallback,
}

impl std::fmt::Display for Lane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Crisis => "crisis",
            Self::Greeting => "greeting",
            Self::Emotional => "emotional",
            Self::Complex => "complex",
            Self::Fallback => "fallback",
        };
        write!(f, "{}", s)
    }
}

/// Subsystems a lane may engage while building a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubsystemId {
    CrisisResponse,
    Emotion,
    Memory,
    Personality,
    Rag,
}

impl std::fmt::Display for SubsystemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::CrisisResponse => "crisis_response",
            Self::Emotion => "emotion",
            Self::Memory => "memory",
            Self::Personality => "personality",
            Self::Rag => "rag",
        };
        write!(f, "{}", s)
    }
}

/// Routing decision for one input, computed fresh per turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteDecision {
    pub lane: Lane,
    /// Latency budget for the lane, in milliseconds. A scheduling target,
    /// not a hard runtime guarantee.
    pub estimated_time_ms: u64,
    pub subsystems: Vec<SubsystemId>,
}

// ============================================================================
// Final response
// ============================================================================

/// The pipeline's answer for one user turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseResult {
    pub text: String,
    pub processing_time_ms: u64,
    /// Names of subsystems that actually contributed to the reply.
    pub systems_engaged: Vec<String>,
    pub confidence: f64,
    pub route_type: Lane,
    pub crisis_detected: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_display() {
        assert_eq!(Lane::Crisis.to_string(), "crisis");
        assert_eq!(Lane::Greeting.to_string(), "greeting");
        assert_eq!(Lane::Fallback.to_string(), "fallback");
    }

    #[test]
    fn test_message_roles() {
        let m = Message::user("hello");
        assert_eq!(m.role, Role::User);
        let r = Message::assistant("hi there");
        assert_eq!(r.role, Role::Assistant);
    }

    #[test]
    fn test_subsystem_display() {
        assert_eq!(SubsystemId::CrisisResponse.to_string(), "crisis_response");
        assert_eq!(SubsystemId::Rag.to_string(), "rag");
    }

    #[test]
    fn test_response_result_wire_format() {
        let r = ResponseResult {
            text: "I'm listening.".to_string(),
            processing_time_ms: 12,
            systems_engaged: vec!["emotion".to_string()],
            confidence: 0.7,
            route_type: Lane::Emotional,
            crisis_detected: false,
        };
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["route_type"], "emotional");
        assert_eq!(json["systems_engaged"][0], "emotion");
        assert_eq!(json["crisis_detected"], false);
    }
}
