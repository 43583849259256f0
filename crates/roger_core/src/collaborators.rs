//! External collaborator seams.
//!
//! The core treats retrieval and personality voice as opaque collaborators
//! behind traits. Lane executors call them under a timeout and degrade to
//! the next chain item on failure; a collaborator can never fail a turn.

use anyhow::Result;
use async_trait::async_trait;

use crate::types::Lane;

/// Retrieval collaborator (RAG/memory stand-in): ranked text snippets for
/// an input, possibly empty. Must tolerate cancellation mid-call.
#[async_trait]
pub trait ContextRetriever: Send + Sync {
    async fn retrieve_context(&self, input: &str, lane: Lane) -> Result<Vec<String>>;
}

/// Personality/voice template collaborator.
pub trait PersonalityVoice: Send + Sync {
    fn personality_insight(&self, input: &str) -> Option<String>;
}

/// Default retriever: returns nothing, instantly.
#[derive(Debug, Default)]
pub struct NullRetriever;

#[async_trait]
impl ContextRetriever for NullRetriever {
    async fn retrieve_context(&self, _input: &str, _lane: Lane) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

/// Default voice: no insight.
#[derive(Debug, Default)]
pub struct NullVoice;

impl PersonalityVoice for NullVoice {
    fn personality_insight(&self, _input: &str) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_retriever_is_empty() {
        let r = NullRetriever;
        let snippets = r.retrieve_context("anything", Lane::Complex).await.unwrap();
        assert!(snippets.is_empty());
    }

    #[test]
    fn test_null_voice_is_silent() {
        assert!(NullVoice.personality_insight("anything").is_none());
    }
}
