//! Summary figures shown next to the calculator.

use serde::{Deserialize, Serialize};

use crate::api::ScorePoint;

/// Highest score the exam can produce.
pub const MAX_SCORE: f64 = 500.0;

/// Scores above this trigger the celebration effect.
pub const CELEBRATION_THRESHOLD: f64 = 400.0;

/// Attempts, best, and average over the score history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub attempts: usize,
    pub best: f64,
    pub average: f64,
}

impl ScoreSummary {
    /// `None` when there is no history yet.
    pub fn from_history(history: &[ScorePoint]) -> Option<Self> {
        if history.is_empty() {
            return None;
        }
        let best = history
            .iter()
            .map(|p| p.score)
            .fold(f64::NEG_INFINITY, f64::max);
        let sum: f64 = history.iter().map(|p| p.score).sum();
        Some(Self {
            attempts: history.len(),
            best,
            average: sum / history.len() as f64,
        })
    }
}

/// Width of the score progress bar, in percent.
pub fn progress_percent(total_score: f64) -> f64 {
    (total_score / MAX_SCORE * 100.0).min(100.0)
}

pub fn is_celebration(total_score: f64) -> bool {
    total_score > CELEBRATION_THRESHOLD
}
