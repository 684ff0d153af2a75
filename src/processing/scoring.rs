//! Score composition and verdict classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Share of the final score taken by the hard (keyword) sub-score
pub const ALPHA: f64 = 0.7;
/// Requirement weight of must-have terms in the hard sub-score
pub const W_MUST: f64 = 3.0;
/// Requirement weight of good-to-have terms in the hard sub-score
pub const W_GOOD: f64 = 1.0;

/// Lowest score of the `High` band
pub const HIGH_THRESHOLD: u8 = 75;
/// Lowest score of the `Medium` band
pub const MEDIUM_THRESHOLD: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    High,
    Medium,
    Low,
}

impl Verdict {
    /// Bands are inclusive on their lower bound
    pub fn from_score(score: u8) -> Self {
        if score >= HIGH_THRESHOLD {
            Verdict::High
        } else if score >= MEDIUM_THRESHOLD {
            Verdict::Medium
        } else {
            Verdict::Low
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Verdict::High => "High",
            Verdict::Medium => "Medium",
            Verdict::Low => "Low",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreComposer {
    alpha: f64,
}

impl Default for ScoreComposer {
    fn default() -> Self {
        Self { alpha: ALPHA }
    }
}

impl ScoreComposer {
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// `round(alpha * hard + (1 - alpha) * semantic)`, clamped to 0..=100
    pub fn compose(&self, hard_score: f64, semantic_score: f64) -> u8 {
        let hard = sanitize(hard_score);
        let semantic = sanitize(semantic_score);
        let blended = self.alpha * hard + (1.0 - self.alpha) * semantic;
        blended.round().clamp(0.0, 100.0) as u8
    }

    pub fn classify(&self, hard_score: f64, semantic_score: f64) -> (u8, Verdict) {
        let score = self.compose(hard_score, semantic_score);
        (score, Verdict::from_score(score))
    }
}

/// Keep sub-scores inside [0, 100]; NaN counts as zero
fn sanitize(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Reported sub-scores carry two decimals
pub fn round_score(value: f64) -> f64 {
    (sanitize(value) * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_score_has_exactly_one_verdict() {
        for score in 0..=100u8 {
            let verdict = Verdict::from_score(score);
            let expected = if score >= 75 {
                Verdict::High
            } else if score >= 50 {
                Verdict::Medium
            } else {
                Verdict::Low
            };
            assert_eq!(verdict, expected, "score {}", score);
        }
    }

    #[test]
    fn test_boundaries_belong_to_higher_band() {
        assert_eq!(Verdict::from_score(49), Verdict::Low);
        assert_eq!(Verdict::from_score(50), Verdict::Medium);
        assert_eq!(Verdict::from_score(74), Verdict::Medium);
        assert_eq!(Verdict::from_score(75), Verdict::High);
        assert_eq!(Verdict::from_score(100), Verdict::High);
    }

    #[test]
    fn test_compose_blends_with_alpha() {
        let composer = ScoreComposer::default();
        assert!(composer.alpha() > 0.5);

        assert_eq!(composer.compose(100.0, 100.0), 100);
        assert_eq!(composer.compose(0.0, 0.0), 0);
        assert_eq!(composer.compose(80.0, 0.0), 56);
        assert_eq!(composer.compose(100.0, 0.0), 70);
        assert_eq!(composer.compose(0.0, 100.0), 30);
    }

    #[test]
    fn test_compose_is_total() {
        let composer = ScoreComposer::default();
        assert_eq!(composer.compose(f64::NAN, 50.0), 15);
        assert_eq!(composer.compose(250.0, -10.0), 70);
    }

    #[test]
    fn test_classify() {
        let composer = ScoreComposer::default();
        assert_eq!(composer.classify(80.0, 40.0), (68, Verdict::Medium));
        assert_eq!(composer.classify(100.0, 90.0), (97, Verdict::High));
        assert_eq!(composer.classify(0.0, 20.0), (6, Verdict::Low));
    }

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(66.66666), 66.67);
        assert_eq!(round_score(-3.0), 0.0);
        assert_eq!(round_score(f64::NAN), 0.0);
    }

    #[test]
    fn test_verdict_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Verdict::Medium).unwrap(), "\"Medium\"");
        assert_eq!(Verdict::High.to_string(), "High");
    }
}
