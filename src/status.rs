use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{format_hours, ProgressSnapshot, StatusKind};

// ─── Color ──────────────────────────────────────────────────────────────────

/// An sRGB triple, written in config files as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(c: Rgb) -> Self {
        [c.0, c.1, c.2]
    }
}

impl From<Rgb> for ratatui::style::Color {
    fn from(c: Rgb) -> Self {
        ratatui::style::Color::Rgb(c.0, c.1, c.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.0, self.1, self.2)
    }
}

// ─── Indicator settings ─────────────────────────────────────────────────────

/// Colors and geometry of the battery indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorStyle {
    pub low: Rgb,
    pub mid: Rgb,
    pub high: Rgb,
    /// Shown before the course starts.
    pub idle: Rgb,
    /// Shown once the course is over.
    pub full: Rgb,
    /// Width units per percent.
    pub scale: f64,
    pub max_width: u16,
    pub idle_width: u16,
}

impl Default for IndicatorStyle {
    fn default() -> Self {
        Self {
            low: Rgb(244, 67, 54),
            mid: Rgb(255, 193, 7),
            high: Rgb(76, 175, 80),
            idle: Rgb(150, 150, 150),
            full: Rgb(76, 175, 80),
            scale: 1.2,
            max_width: 120,
            idle_width: 5,
        }
    }
}

// ─── Presenter ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusView {
    pub message: String,
    #[serde(serialize_with = "serialize_css")]
    pub color: Rgb,
    pub indicator_width: u16,
}

fn serialize_css<S: serde::Serializer>(color: &Rgb, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(color)
}

pub fn present(snapshot: &ProgressSnapshot, style: &IndicatorStyle) -> StatusView {
    match snapshot.status_kind {
        StatusKind::NotStarted => StatusView {
            message: "The course has not started yet!".into(),
            color: style.idle,
            indicator_width: style.idle_width.min(style.max_width),
        },
        StatusKind::Completed => StatusView {
            message: "Course complete! Congratulations! 🎉".into(),
            color: style.full,
            indicator_width: style.max_width,
        },
        StatusKind::InProgress => StatusView {
            message: format!(
                "Studying in progress! {} hours left.",
                format_hours(snapshot.remaining_hours)
            ),
            color: interpolate_color(style.low, style.mid, style.high, snapshot.progress_percent),
            indicator_width: indicator_width(snapshot.progress_percent, style.scale, style.max_width),
        },
    }
}

/// Piecewise-linear blend low→mid over 0–50 and mid→high over 50–100.
/// Channels are truncated toward zero.
pub fn interpolate_color(low: Rgb, mid: Rgb, high: Rgb, percent: f64) -> Rgb {
    let percent = percent.clamp(0.0, 100.0);
    let (from, to, factor) = if percent < 50.0 {
        (low, mid, percent / 50.0)
    } else {
        (mid, high, (percent - 50.0) / 50.0)
    };

    let channel = |a: u8, b: u8| -> u8 {
        let v = a as f64 + (b as f64 - a as f64) * factor;
        v.trunc().clamp(0.0, 255.0) as u8
    };

    Rgb(
        channel(from.0, to.0),
        channel(from.1, to.1),
        channel(from.2, to.2),
    )
}

/// `min(floor(percent * scale), max_width)`, never negative.
pub fn indicator_width(percent: f64, scale: f64, max_width: u16) -> u16 {
    let raw = (percent * scale).floor();
    if raw.is_nan() || raw <= 0.0 {
        0
    } else if raw >= max_width as f64 {
        max_width
    } else {
        raw as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn snapshot(kind: StatusKind, percent: f64, remaining: f64) -> ProgressSnapshot {
        ProgressSnapshot {
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            total_hours: 580.0,
            elapsed_hours: 580.0 - remaining,
            remaining_hours: remaining,
            progress_percent: percent,
            current_level: "A2.1".into(),
            status_kind: kind,
            days_left: 10,
        }
    }

    #[test]
    fn anchors_are_hit_exactly() {
        let s = IndicatorStyle::default();
        assert_eq!(interpolate_color(s.low, s.mid, s.high, 0.0), s.low);
        assert_eq!(interpolate_color(s.low, s.mid, s.high, 50.0), s.mid);
        assert_eq!(interpolate_color(s.low, s.mid, s.high, 100.0), s.high);
    }

    #[test]
    fn channels_are_truncated_not_rounded() {
        let s = IndicatorStyle::default();
        // 25%: red 244 + 11 * 0.5 = 249.5, green 67 + 126 * 0.5 = 130, blue 54 - 47 * 0.5 = 30.5
        assert_eq!(interpolate_color(s.low, s.mid, s.high, 25.0), Rgb(249, 130, 30));
        // 75%: red 255 - 179 * 0.5 = 165.5, green 193 - 18 * 0.5 = 184, blue 7 + 73 * 0.5 = 43.5
        assert_eq!(interpolate_color(s.low, s.mid, s.high, 75.0), Rgb(165, 184, 43));
    }

    #[test]
    fn color_formats_as_css_rgb() {
        assert_eq!(Rgb(76, 175, 80).to_string(), "rgb(76,175,80)");
    }

    #[test]
    fn width_is_monotonic_and_bounded() {
        let mut last = 0;
        for step in 0..=1000 {
            let percent = step as f64 / 10.0;
            let w = indicator_width(percent, 1.2, 120);
            assert!(w >= last);
            assert!(w <= 120);
            last = w;
        }
        assert_eq!(indicator_width(50.0, 1.2, 120), 60);
        assert_eq!(indicator_width(99.9, 1.2, 120), 119);
        assert_eq!(indicator_width(100.0, 2.0, 120), 120);
        assert_eq!(indicator_width(-5.0, 1.2, 120), 0);
    }

    #[test]
    fn not_started_uses_idle_look() {
        let style = IndicatorStyle::default();
        let view = present(&snapshot(StatusKind::NotStarted, 0.0, 580.0), &style);
        assert_eq!(view.color, style.idle);
        assert_eq!(view.indicator_width, 5);
        assert_eq!(view.message, "The course has not started yet!");
    }

    #[test]
    fn completed_fills_the_indicator() {
        let style = IndicatorStyle::default();
        let view = present(&snapshot(StatusKind::Completed, 100.0, 0.0), &style);
        assert_eq!(view.color, Rgb(76, 175, 80));
        assert_eq!(view.indicator_width, 120);
        assert!(view.message.contains("Congratulations"));
    }

    #[test]
    fn in_progress_reports_remaining_hours() {
        let style = IndicatorStyle::default();
        let view = present(&snapshot(StatusKind::InProgress, 50.0, 290.0), &style);
        assert_eq!(view.message, "Studying in progress! 290 hours left.");
        assert_eq!(view.color, style.mid);
        assert_eq!(view.indicator_width, 60);
    }

    #[test]
    fn status_view_serializes_color_as_css() {
        let view = StatusView {
            message: "x".into(),
            color: Rgb(1, 2, 3),
            indicator_width: 7,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["color"], "rgb(1,2,3)");
        assert_eq!(json["indicator_width"], 7);
    }
}
