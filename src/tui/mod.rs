pub mod event;
pub mod ui;

use chrono::{Duration, Local, NaiveDate};

use crate::config::{ConfigSource, Course};
use crate::models::StatusKind;
use crate::report::Report;

// ─── App State ──────────────────────────────────────────────────────────────

pub struct App {
    pub course: Course,
    pub source: ConfigSource,
    pub running: bool,

    /// Fixed preview date; `None` follows the local clock.
    pub pinned_date: Option<NaiveDate>,
    pub report: Report,

    // Status
    pub status_message: String,

    // Incremented each frame; used to blink the battery cap while charging.
    pub frame_count: u64,
}

impl App {
    pub fn new(course: Course, source: ConfigSource, pinned_date: Option<NaiveDate>) -> Self {
        let today = pinned_date.unwrap_or_else(|| Local::now().date_naive());
        let report = Report::build(&course, today);
        let status_message = format!("Loaded {}", source);
        Self {
            course,
            source,
            running: true,
            pinned_date,
            report,
            status_message,
            frame_count: 0,
        }
    }

    /// Date the dashboard is showing.
    pub fn current_date(&self) -> NaiveDate {
        self.pinned_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn is_previewing(&self) -> bool {
        self.pinned_date.is_some()
    }

    /// Rebuild the report for the current date. Cheap enough to run every frame,
    /// so the clock rolling past midnight is picked up without user input.
    pub fn refresh(&mut self) {
        let previous = self.report.snapshot.status_kind;
        self.report = Report::build(&self.course, self.current_date());
        let current = self.report.snapshot.status_kind;
        if previous != current {
            tracing::debug!(from = ?previous, to = ?current, "course status changed");
        }
    }

    pub fn shift_date(&mut self, days: i64) {
        let target = self.current_date() + Duration::days(days);
        self.pinned_date = Some(target);
        tracing::info!(date = %target, "previewing date");
        self.status_message = format!("Previewing {}", target.format("%a %b %d %Y"));
        self.refresh();
    }

    pub fn jump_to_today(&mut self) {
        self.pinned_date = None;
        self.status_message = "Following today".into();
        self.refresh();
    }

    pub fn status_kind(&self) -> StatusKind {
        self.report.snapshot.status_kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub(super) fn app_on(now: NaiveDate) -> App {
        let course = Config::default().validate().unwrap();
        App::new(course, ConfigSource::BuiltIn, Some(now))
    }

    #[test]
    fn report_ties_snapshot_status_and_roadmap_together() {
        let app = app_on(date(2025, 6, 1));
        let report = &app.report;
        assert_eq!(report.snapshot.status_kind, StatusKind::InProgress);
        assert_eq!(report.snapshot.current_level, "A2.1");
        assert!(report.status.message.contains("hours left"));
        assert_eq!(report.roadmap.reached.len(), 4);
        assert_eq!(report.roadmap.remaining.len(), 4);
    }

    #[test]
    fn shifting_pins_and_recomputes() {
        let mut app = app_on(date(2025, 10, 9));
        assert_eq!(app.status_kind(), StatusKind::InProgress);
        app.shift_date(1);
        assert_eq!(app.current_date(), date(2025, 10, 10));
        assert_eq!(app.status_kind(), StatusKind::Completed);
        assert_eq!(app.report.snapshot.current_level, "B1");
        app.shift_date(-200);
        assert_eq!(app.current_date(), date(2025, 3, 24));
        assert_eq!(app.report.snapshot.current_level, "A0");
    }

    #[test]
    fn jumping_to_today_unpins() {
        let mut app = app_on(date(2025, 1, 1));
        assert!(app.is_previewing());
        let before = Local::now().date_naive();
        app.jump_to_today();
        assert!(!app.is_previewing());
        let shown = app.report.snapshot.date;
        assert!(shown == before || shown == before + Duration::days(1));
    }

    #[test]
    fn report_serializes_for_json_output() {
        let app = app_on(date(2025, 3, 23));
        let json = serde_json::to_value(&app.report).unwrap();
        assert_eq!(json["snapshot"]["status_kind"], "not-started");
        assert_eq!(json["status"]["color"], "rgb(150,150,150)");
        assert_eq!(json["roadmap"]["remaining"][0]["label"], "A0");
    }
}
