mod levels;

pub use levels::{LevelError, LevelLadder};

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::{ProgressSnapshot, StatusKind};

// ─── Error types ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScheduleError {
    #[error("End date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    #[error("Hours per day must be a positive number, got {0}")]
    InvalidHours(f64),
    #[error("At least one study weekday is required")]
    NoWeekdays,
}

// ─── Schedule ───────────────────────────────────────────────────────────────

/// A study calendar: a fixed number of hours on each active weekday between
/// two dates, both inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    start_date: NaiveDate,
    end_date: NaiveDate,
    hours_per_day: f64,
    /// Indexed by `Weekday::num_days_from_monday`.
    active: [bool; 7],
}

impl Schedule {
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        hours_per_day: f64,
        weekdays: &[Weekday],
    ) -> Result<Self, ScheduleError> {
        if end_date < start_date {
            return Err(ScheduleError::EndBeforeStart {
                start: start_date,
                end: end_date,
            });
        }
        if !hours_per_day.is_finite() || hours_per_day <= 0.0 {
            return Err(ScheduleError::InvalidHours(hours_per_day));
        }
        if weekdays.is_empty() {
            return Err(ScheduleError::NoWeekdays);
        }

        let mut active = [false; 7];
        for day in weekdays {
            active[day.num_days_from_monday() as usize] = true;
        }

        Ok(Self {
            start_date,
            end_date,
            hours_per_day,
            active,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn hours_per_day(&self) -> f64 {
        self.hours_per_day
    }

    pub fn is_active(&self, day: Weekday) -> bool {
        self.active[day.num_days_from_monday() as usize]
    }

    pub fn active_weekdays(&self) -> Vec<Weekday> {
        WEEK.iter().copied().filter(|d| self.is_active(*d)).collect()
    }

    /// Active study days in `[from, to]`, walking every calendar date.
    pub fn active_days_between(&self, from: NaiveDate, to: NaiveDate) -> u32 {
        from.iter_days()
            .take_while(|d| *d <= to)
            .filter(|d| self.is_active(d.weekday()))
            .count() as u32
    }

    pub fn total_hours(&self) -> f64 {
        self.hours_per_day * self.active_days_between(self.start_date, self.end_date) as f64
    }

    /// Hours accrued from the start date through `date` inclusive, capped at
    /// the end date.
    pub fn hours_through(&self, date: NaiveDate) -> f64 {
        if date < self.start_date {
            return 0.0;
        }
        let upper = date.min(self.end_date);
        self.hours_per_day * self.active_days_between(self.start_date, upper) as f64
    }

    pub fn status_on(&self, now: NaiveDate) -> StatusKind {
        if now < self.start_date {
            StatusKind::NotStarted
        } else if now >= self.end_date {
            StatusKind::Completed
        } else {
            StatusKind::InProgress
        }
    }
}

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

// ─── Calculator ─────────────────────────────────────────────────────────────

/// Builds the snapshot for `now`. The before-start and on-or-after-end cases
/// are pinned to exact values rather than taken from the hour arithmetic.
pub fn compute(schedule: &Schedule, levels: &LevelLadder, now: NaiveDate) -> ProgressSnapshot {
    let total_hours = schedule.total_hours();
    let days_left = (schedule.end_date() - now).num_days().max(0);
    let status_kind = schedule.status_on(now);

    let (elapsed_hours, remaining_hours, progress_percent, current_level) = match status_kind {
        StatusKind::NotStarted => (0.0, total_hours, 0.0, levels.initial().to_string()),
        StatusKind::Completed => (total_hours, 0.0, 100.0, levels.last().label.clone()),
        StatusKind::InProgress => {
            let elapsed = schedule.hours_through(now);
            let remaining = (total_hours - elapsed).max(0.0);
            let percent = if total_hours > 0.0 {
                (100.0 * elapsed / total_hours).clamp(0.0, 100.0)
            } else {
                0.0
            };
            (elapsed, remaining, percent, levels.resolve(now).to_string())
        }
    };

    ProgressSnapshot {
        date: now,
        total_hours,
        elapsed_hours,
        remaining_hours,
        progress_percent,
        current_level,
        status_kind,
        days_left,
    }
}
