//! Response finishing.
//!
//! Every draft passes through here before reaching the user: repetition
//! repair first, then the specialized-topic safety injector. The output is
//! never empty; a hollowed-out draft falls back to a fixed listening line.

use crate::detectors::{inject_safety_resource, TopicDetection};
use crate::repetition::fix_harmful_repetitions;

/// Safe line used when finishing would otherwise produce nothing.
pub const EMPTY_DRAFT_FALLBACK: &str = "I'm here to listen. What would you like to share?";

/// Finish a draft: fix repetition, then inject safety content.
///
/// The repetition pass runs first so a resource line appended afterwards
/// can never be mistaken for a duplicated sentence and stripped.
pub fn finish(draft: &str, topic: &TopicDetection) -> String {
    let fixed = fix_harmful_repetitions(draft);
    let injected = inject_safety_resource(&fixed, topic);

    if injected.trim().is_empty() {
        EMPTY_DRAFT_FALLBACK.to_string()
    } else {
        injected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::detect_specialized_topic;

    #[test]
    fn test_finish_fixes_and_injects() {
        let topic = detect_specialized_topic("I want to kill myself");
        let out = finish("I'm glad you told me. I'm glad you told me.", &topic);
        assert_eq!(out.matches("I'm glad you told me").count(), 1);
        assert!(out.contains("988"));
    }

    #[test]
    fn test_finish_idempotent_injection() {
        let topic = detect_specialized_topic("I want to kill myself");
        let once = finish("I'm taking this seriously.", &topic);
        let twice = finish(&once, &topic);
        assert_eq!(once.matches("988").count(), 1);
        assert_eq!(twice.matches("988").count(), 1);
    }

    #[test]
    fn test_finish_never_empty() {
        let topic = detect_specialized_topic("neutral message");
        let out = finish("", &topic);
        assert_eq!(out, EMPTY_DRAFT_FALLBACK);
    }

    #[test]
    fn test_finish_plain_draft_untouched() {
        let topic = detect_specialized_topic("tell me about the weather");
        let out = finish("It has been sunny all week here.", &topic);
        assert_eq!(out, "It has been sunny all week here.");
    }
}
