use chrono::NaiveDate;

use crate::models::LevelThreshold;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    #[error("At least one level is required")]
    Empty,
    #[error("Level {label} ({date}) is dated before the level preceding it ({previous})")]
    OutOfOrder {
        label: String,
        date: NaiveDate,
        previous: NaiveDate,
    },
    #[error("Level {0} appears more than once")]
    DuplicateLabel(String),
}

/// Proficiency levels ordered by the date each one is reached.
///
/// Never empty; dates are non-decreasing and labels are unique. Two levels
/// may share a date, in which case the later one shadows the earlier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelLadder {
    thresholds: Vec<LevelThreshold>,
}

impl LevelLadder {
    pub fn new(thresholds: Vec<LevelThreshold>) -> Result<Self, LevelError> {
        if thresholds.is_empty() {
            return Err(LevelError::Empty);
        }
        for pair in thresholds.windows(2) {
            if pair[1].date < pair[0].date {
                return Err(LevelError::OutOfOrder {
                    label: pair[1].label.clone(),
                    date: pair[1].date,
                    previous: pair[0].date,
                });
            }
        }
        for (i, t) in thresholds.iter().enumerate() {
            if thresholds[..i].iter().any(|prev| prev.label == t.label) {
                return Err(LevelError::DuplicateLabel(t.label.clone()));
            }
        }
        Ok(Self { thresholds })
    }

    /// Label of the last level reached on `now`, or the initial level when
    /// none has been reached yet.
    pub fn resolve(&self, now: NaiveDate) -> &str {
        self.thresholds
            .iter()
            .rev()
            .find(|t| t.date <= now)
            .map(|t| t.label.as_str())
            .unwrap_or_else(|| self.initial())
    }

    pub fn initial(&self) -> &str {
        &self.thresholds[0].label
    }

    pub fn last(&self) -> &LevelThreshold {
        &self.thresholds[self.thresholds.len() - 1]
    }

    pub fn thresholds(&self) -> &[LevelThreshold] {
        &self.thresholds
    }

    /// Ladder rung of `label`; used as the y coordinate on the roadmap.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.thresholds.iter().position(|t| t.label == label)
    }
}
