use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ─── Levels ─────────────────────────────────────────────────────────────────

/// A named proficiency tier that becomes current on `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelThreshold {
    pub label: String,
    pub date: NaiveDate,
}

impl LevelThreshold {
    pub fn new(label: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            label: label.into(),
            date,
        }
    }
}

// ─── Progress ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusKind {
    NotStarted,
    InProgress,
    Completed,
}

impl StatusKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not started",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
        }
    }
}

/// Everything the dashboard shows for one date. Rebuilt on every query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub date: NaiveDate,
    pub total_hours: f64,
    pub elapsed_hours: f64,
    pub remaining_hours: f64,
    /// 0–100.
    pub progress_percent: f64,
    pub current_level: String,
    pub status_kind: StatusKind,
    /// Whole calendar days until the end date, never negative.
    pub days_left: i64,
}

// ─── Formatting ─────────────────────────────────────────────────────────────

/// Renders hour counts without a trailing `.0` when they are whole.
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{hours:.0}")
    } else {
        format!("{hours:.1}")
    }
}
