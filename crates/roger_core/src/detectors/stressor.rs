//! Stressor detection over the static catalogs.
//!
//! Pure function: lowercase the input, intersect it with every catalog
//! entry's keywords (substring containment, not tokenized exact match),
//! score matches, sort by confidence descending.

use serde::Serialize;

use super::stressor_catalog::{all_stressors, Severity, StressorCategory};
use crate::confidence::{self, STRESSOR_WEIGHTS};

/// Default confidence bar for acting on a single stressor match; the
/// configured value (`thresholds.primary_stressor`) is what callers pass.
pub const PRIMARY_STRESSOR_THRESHOLD: f64 = 0.6;

/// Intensity markers scanned severe-first; the first list that matches wins.
const SEVERE_MARKERS: &[&str] = &[
    "extremely",
    "unbearable",
    "can't take it",
    "can't handle",
    "falling apart",
    "breaking down",
    "worst",
    "severe",
];

const MILD_MARKERS: &[&str] = &[
    "a little",
    "a bit",
    "slightly",
    "somewhat",
    "kind of",
    "sort of",
];

/// One stressor matched against an input.
#[derive(Debug, Clone, Serialize)]
pub struct DetectedStressor {
    pub stressor_id: &'static str,
    pub name: &'static str,
    pub category: StressorCategory,
    pub confidence: f64,
    pub matched_keywords: Vec<&'static str>,
    /// Severity after intensity-marker adjustment.
    pub intensity: Severity,
}

/// Detect stressors in free text, best match first.
pub fn detect_stressors(input: &str) -> Vec<DetectedStressor> {
    let lower = input.to_lowercase();
    let intensity_override = detect_intensity(&lower);

    let mut detected: Vec<DetectedStressor> = all_stressors()
        .filter_map(|s| {
            let matched: Vec<&'static str> = s
                .keywords
                .iter()
                .filter(|k| lower.contains(&***k))
                .copied()
                .collect();
            if matched.is_empty() {
                return None;
            }
            let conf =
                confidence::from_match_ratio(matched.len(), s.keywords.len(), STRESSOR_WEIGHTS);
            Some(DetectedStressor {
                stressor_id: s.id,
                name: s.name,
                category: s.category,
                confidence: conf,
                matched_keywords: matched,
                intensity: intensity_override.unwrap_or(s.severity),
            })
        })
        .collect();

    detected.sort_by(|a, b| b.confidence.partial_cmp(&a.confidence).unwrap_or(std::cmp::Ordering::Equal));
    detected
}

/// Top stressor, only when it clears `threshold`.
pub fn primary_stressor(input: &str, threshold: f64) -> Option<DetectedStressor> {
    detect_stressors(input)
        .into_iter()
        .next()
        .filter(|s| s.confidence > threshold)
}

/// Best stressor confidence for routing, 0.0 when nothing matched.
pub fn top_confidence(input: &str) -> f64 {
    detect_stressors(input)
        .first()
        .map(|s| s.confidence)
        .unwrap_or(0.0)
}

/// Severe markers are scanned before mild ones; first match wins.
fn detect_intensity(lower: &str) -> Option<Severity> {
    if SEVERE_MARKERS.iter().any(|m| lower.contains(m)) {
        return Some(Severity::Severe);
    }
    if MILD_MARKERS.iter().any(|m| lower.contains(m)) {
        return Some(Severity::Mild);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boss_yelling_detects_work() {
        let detected = detect_stressors("My boss keeps yelling at me and I can't take it anymore");
        assert!(!detected.is_empty());
        let top = &detected[0];
        assert_eq!(top.category, StressorCategory::Work);
        assert!(top.matched_keywords.contains(&"boss"));
        assert!(top.matched_keywords.contains(&"yelling"));
        // "can't take it" is a severe marker
        assert_eq!(top.intensity, Severity::Severe);
    }

    #[test]
    fn test_sorted_by_confidence() {
        let detected = detect_stressors("my boss and my rent and my bills are all too much");
        for pair in detected.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
    }

    #[test]
    fn test_no_match_empty() {
        assert!(detect_stressors("the sky is blue today").is_empty());
        assert!(primary_stressor("the sky is blue today", PRIMARY_STRESSOR_THRESHOLD).is_none());
    }

    #[test]
    fn test_primary_requires_threshold() {
        // A single keyword out of seven scores 0.5 + 1/7*0.4 ≈ 0.557, below 0.6
        let weak = primary_stressor("thinking about school", PRIMARY_STRESSOR_THRESHOLD);
        assert!(weak.is_none());

        // Multiple keywords clear the bar
        let strong = primary_stressor(
            "my boss at work keeps yelling during my shift",
            PRIMARY_STRESSOR_THRESHOLD,
        );
        assert!(strong.is_some());
        assert!(strong.unwrap().confidence > PRIMARY_STRESSOR_THRESHOLD);
    }

    #[test]
    fn test_primary_threshold_is_tunable() {
        // ≈0.557 sits below the default bar but above a looser one
        let input = "thinking about school";
        assert!(primary_stressor(input, PRIMARY_STRESSOR_THRESHOLD).is_none());
        assert!(primary_stressor(input, 0.5).is_some());
    }

    #[test]
    fn test_mild_marker() {
        let detected = detect_stressors("I'm a little worried about my rent money");
        assert!(!detected.is_empty());
        assert_eq!(detected[0].intensity, Severity::Mild);
    }

    #[test]
    fn test_severe_wins_over_mild() {
        // Both marker families present: severe scanned first
        let detected = detect_stressors("I'm a little tired but work is extremely hard");
        assert!(!detected.is_empty());
        assert_eq!(detected[0].intensity, Severity::Severe);
    }

    #[test]
    fn test_default_catalog_severity() {
        let detected = detect_stressors("money and bills are on my mind");
        assert!(!detected.is_empty());
        // No marker in input: catalog severity stands
        assert_eq!(detected[0].intensity, Severity::Moderate);
    }

    #[test]
    fn test_adult_catalog_reachable() {
        let detected = detect_stressors("the mortgage and credit card debt keep me up");
        assert!(detected.iter().any(|s| s.stressor_id.starts_with("adult_stressor_")));
    }

    #[test]
    fn test_confidence_bounds() {
        let inputs = [
            "boss work job coworker yelling fired shift",
            "school",
            "mortgage debt loans credit card foreclosure collections",
        ];
        for input in inputs {
            for s in detect_stressors(input) {
                assert!((0.0..=0.9).contains(&s.confidence), "{}", s.confidence);
            }
        }
    }
}
