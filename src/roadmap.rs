use chrono::NaiveDate;
use serde::Serialize;

use crate::models::LevelThreshold;
use crate::schedule::LevelLadder;

/// The level ladder split at `now` for the roadmap chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Roadmap {
    /// Levels dated on or before `now`.
    pub reached: Vec<LevelThreshold>,
    /// Levels still ahead. Empty once the course has ended.
    pub remaining: Vec<LevelThreshold>,
}

pub fn build(levels: &LevelLadder, end_date: NaiveDate, now: NaiveDate) -> Roadmap {
    let (reached, ahead): (Vec<_>, Vec<_>) = levels
        .thresholds()
        .iter()
        .cloned()
        .partition(|t| t.date <= now);

    let remaining = if now < end_date { ahead } else { Vec::new() };

    Roadmap { reached, remaining }
}

impl Roadmap {
    /// Chart points as (days since `origin`, ladder rung).
    pub fn points(
        series: &[LevelThreshold],
        levels: &LevelLadder,
        origin: NaiveDate,
    ) -> Vec<(f64, f64)> {
        series
            .iter()
            .filter_map(|t| {
                let rung = levels.position(&t.label)?;
                Some(((t.date - origin).num_days() as f64, rung as f64))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ladder() -> LevelLadder {
        LevelLadder::new(vec![
            LevelThreshold::new("A0", date(2025, 3, 24)),
            LevelThreshold::new("A1", date(2025, 5, 1)),
            LevelThreshold::new("A2", date(2025, 7, 1)),
            LevelThreshold::new("B1", date(2025, 10, 10)),
        ])
        .unwrap()
    }

    fn labels(series: &[LevelThreshold]) -> Vec<&str> {
        series.iter().map(|t| t.label.as_str()).collect()
    }

    #[test]
    fn splits_at_now_inclusive() {
        let map = build(&ladder(), date(2025, 10, 10), date(2025, 5, 1));
        assert_eq!(labels(&map.reached), ["A0", "A1"]);
        assert_eq!(labels(&map.remaining), ["A2", "B1"]);
    }

    #[test]
    fn before_start_everything_remains() {
        let map = build(&ladder(), date(2025, 10, 10), date(2025, 1, 1));
        assert!(map.reached.is_empty());
        assert_eq!(map.remaining.len(), 4);
    }

    #[test]
    fn after_end_nothing_remains() {
        let map = build(&ladder(), date(2025, 10, 10), date(2025, 10, 10));
        assert_eq!(map.reached.len(), 4);
        assert!(map.remaining.is_empty());
    }

    #[test]
    fn points_use_day_offsets_and_rungs() {
        let levels = ladder();
        let map = build(&levels, date(2025, 10, 10), date(2025, 5, 1));
        let pts = Roadmap::points(&map.reached, &levels, date(2025, 3, 24));
        assert_eq!(pts, vec![(0.0, 0.0), (38.0, 1.0)]);
    }
}
