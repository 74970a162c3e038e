//! Scorecard
//!
//! The bounded, fully populated feedback result and its presentation helpers.

use serde::{Deserialize, Serialize};

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 10.0;
/// Used for any score the model left out
pub const NEUTRAL_SCORE: f64 = 7.5;
/// Upper bound on strengths and improvements
pub const MAX_LIST_ITEMS: usize = 5;

/// Wire names of the five dimensions, in display order
pub const DIMENSION_KEYS: [&str; 5] = ["逻辑清晰度", "专业契合度", "表达能力", "问题理解力", "压力应对力"];

/// Clamp into [1, 10] and keep one decimal. Idempotent.
pub fn clamp_score(score: f64) -> f64 {
    if !score.is_finite() {
        return NEUTRAL_SCORE;
    }
    (score.clamp(MIN_SCORE, MAX_SCORE) * 10.0).round() / 10.0
}

/// The five named dimension scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores {
    #[serde(rename = "逻辑清晰度")]
    pub logical_clarity: f64,
    #[serde(rename = "专业契合度")]
    pub professional_fit: f64,
    #[serde(rename = "表达能力")]
    pub expression: f64,
    #[serde(rename = "问题理解力")]
    pub comprehension: f64,
    #[serde(rename = "压力应对力")]
    pub stress_handling: f64,
}

impl DimensionScores {
    /// Build from scores listed in `DIMENSION_KEYS` order, clamping each
    pub fn from_ordered(scores: [f64; 5]) -> Self {
        let [logical_clarity, professional_fit, expression, comprehension, stress_handling] =
            scores.map(clamp_score);
        Self {
            logical_clarity,
            professional_fit,
            expression,
            comprehension,
            stress_handling,
        }
    }

    /// `(key, score)` pairs in display order
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            (DIMENSION_KEYS[0], self.logical_clarity),
            (DIMENSION_KEYS[1], self.professional_fit),
            (DIMENSION_KEYS[2], self.expression),
            (DIMENSION_KEYS[3], self.comprehension),
            (DIMENSION_KEYS[4], self.stress_handling),
        ]
    }
}

/// Validated interview feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scorecard {
    pub overall_score: f64,
    pub dimension_scores: DimensionScores,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub summary: String,
}

impl Scorecard {
    pub fn level(&self) -> ScoreLevel {
        ScoreLevel::from_score(self.overall_score)
    }

    /// Every numeric field in [1, 10] and both lists within bounds
    pub fn is_within_bounds(&self) -> bool {
        let in_range = |s: f64| (MIN_SCORE..=MAX_SCORE).contains(&s);
        in_range(self.overall_score)
            && self.dimension_scores.entries().iter().all(|(_, s)| in_range(*s))
            && self.strengths.len() <= MAX_LIST_ITEMS
            && self.improvements.len() <= MAX_LIST_ITEMS
    }
}

/// Coarse rating band for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreLevel {
    Excellent,
    Good,
    Average,
    Poor,
}

impl ScoreLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 8.5 {
            Self::Excellent
        } else if score >= 7.0 {
            Self::Good
        } else if score >= 5.5 {
            Self::Average
        } else {
            Self::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "优秀",
            Self::Good => "良好",
            Self::Average => "一般",
            Self::Poor => "待改进",
        }
    }
}

pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

/// `45分钟`, `2小时`, `1小时30分钟`
pub fn format_duration(minutes: u32) -> String {
    if minutes < 60 {
        return format!("{}分钟", minutes);
    }
    let hours = minutes / 60;
    match minutes % 60 {
        0 => format!("{}小时", hours),
        rest => format!("{}小时{}分钟", hours, rest),
    }
}
