//! Keyword-confidence scoring.
//!
//! A single scoring utility shared by the specialized-topic and stressor
//! detectors. The two families historically carried near-identical formulas
//! with slightly different constants; parameterizing the weights here keeps
//! them from drifting apart.

/// Weight constants for a keyword-confidence formula.
#[derive(Debug, Clone, Copy)]
pub struct ConfidenceWeights {
    /// Score assigned at one matched keyword.
    pub base: f64,
    /// Added per matched keyword beyond the base.
    pub per_match: f64,
    /// Hard cap. Deliberately below 1.0 so a single detector never claims
    /// certainty on its own.
    pub cap: f64,
}

/// Specialized-topic weights: min(0.4 + matches * 0.2, 0.9).
pub const TOPIC_WEIGHTS: ConfidenceWeights = ConfidenceWeights {
    base: 0.4,
    per_match: 0.2,
    cap: 0.9,
};

/// Bonus added to topic confidence for long inputs (> 100 chars).
pub const LONG_INPUT_BONUS: f64 = 0.1;
pub const LONG_INPUT_CHARS: usize = 100;

/// Confidence from a raw match count.
pub fn from_match_count(matches: usize, weights: ConfidenceWeights) -> f64 {
    if matches == 0 {
        return 0.0;
    }
    (weights.base + matches as f64 * weights.per_match).min(weights.cap)
}

/// Confidence from a matched/total keyword ratio.
///
/// Stressor formula: min(cap, base + matched/total * per_match) with
/// base 0.5, per_match 0.4, cap 0.9.
pub fn from_match_ratio(matched: usize, total: usize, weights: ConfidenceWeights) -> f64 {
    if matched == 0 || total == 0 {
        return 0.0;
    }
    (weights.base + matched as f64 / total as f64 * weights.per_match).min(weights.cap)
}

/// Stressor weights: min(0.9, 0.5 + ratio * 0.4).
pub const STRESSOR_WEIGHTS: ConfidenceWeights = ConfidenceWeights {
    base: 0.5,
    per_match: 0.4,
    cap: 0.9,
};

/// Apply the long-input bonus, still respecting the cap.
pub fn with_length_bonus(confidence: f64, input_len: usize, weights: ConfidenceWeights) -> f64 {
    if input_len > LONG_INPUT_CHARS {
        (confidence + LONG_INPUT_BONUS).min(weights.cap)
    } else {
        confidence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_topic_formula() {
        assert_relative_eq!(from_match_count(1, TOPIC_WEIGHTS), 0.6);
        assert_relative_eq!(from_match_count(2, TOPIC_WEIGHTS), 0.8);
        // Caps at 0.9 no matter how many keywords match
        assert_relative_eq!(from_match_count(3, TOPIC_WEIGHTS), 0.9);
        assert_relative_eq!(from_match_count(10, TOPIC_WEIGHTS), 0.9);
    }

    #[test]
    fn test_zero_matches_zero_confidence() {
        assert_relative_eq!(from_match_count(0, TOPIC_WEIGHTS), 0.0);
        assert_relative_eq!(from_match_ratio(0, 5, STRESSOR_WEIGHTS), 0.0);
    }

    #[test]
    fn test_stressor_formula() {
        // 2 of 4 keywords: 0.5 + 0.5 * 0.4 = 0.7
        assert_relative_eq!(from_match_ratio(2, 4, STRESSOR_WEIGHTS), 0.7);
        // Full match: 0.5 + 0.4 = 0.9, at the cap
        assert_relative_eq!(from_match_ratio(4, 4, STRESSOR_WEIGHTS), 0.9);
    }

    #[test]
    fn test_length_bonus_respects_cap() {
        let c = from_match_count(1, TOPIC_WEIGHTS);
        assert_relative_eq!(with_length_bonus(c, 150, TOPIC_WEIGHTS), 0.7);
        // Already at cap: bonus cannot push past it
        let c = from_match_count(5, TOPIC_WEIGHTS);
        assert_relative_eq!(with_length_bonus(c, 150, TOPIC_WEIGHTS), 0.9);
        // Short input: no bonus
        let c = from_match_count(1, TOPIC_WEIGHTS);
        assert_relative_eq!(with_length_bonus(c, 50, TOPIC_WEIGHTS), 0.6);
    }

    #[test]
    fn test_bounds() {
        for matches in 0..20 {
            let c = from_match_count(matches, TOPIC_WEIGHTS);
            assert!((0.0..=0.9).contains(&c));
        }
        for matched in 0..10 {
            let c = from_match_ratio(matched, 10, STRESSOR_WEIGHTS);
            assert!((0.0..=0.9).contains(&c));
        }
    }
}
