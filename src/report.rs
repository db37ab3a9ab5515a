use chrono::NaiveDate;
use serde::Serialize;

use crate::config::Course;
use crate::models::ProgressSnapshot;
use crate::roadmap::{self, Roadmap};
use crate::schedule;
use crate::status::{self, StatusView};

// ─── Report ─────────────────────────────────────────────────────────────────

/// Everything derived for one date: the numbers, the indicator and the chart.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub snapshot: ProgressSnapshot,
    pub status: StatusView,
    pub roadmap: Roadmap,
}

impl Report {
    pub fn build(course: &Course, now: NaiveDate) -> Self {
        let snapshot = schedule::compute(&course.schedule, &course.levels, now);
        let status = status::present(&snapshot, &course.indicator);
        let roadmap = roadmap::build(&course.levels, course.schedule.end_date(), now);
        Self {
            snapshot,
            status,
            roadmap,
        }
    }
}
