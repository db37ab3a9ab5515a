use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::LevelThreshold;
use crate::schedule::{LevelError, LevelLadder, Schedule, ScheduleError};
use crate::status::IndicatorStyle;

const ENV_CONFIG: &str = "STUDY_PROGRESS_CONFIG";

// ─── Error types ────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid course schedule: {0}")]
    Schedule(#[from] ScheduleError),
    #[error("Invalid level list: {0}")]
    Levels(#[from] LevelError),
    #[error("Invalid indicator settings: {0}")]
    Indicator(String),
}

// ─── File format ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub course: CourseConfig,
    pub levels: Vec<LevelThreshold>,
    #[serde(default)]
    pub indicator: IndicatorStyle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseConfig {
    pub title: String,
    #[serde(default)]
    pub language: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub hours_per_day: f64,
    pub weekdays: Vec<Weekday>,
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    BuiltIn,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::BuiltIn => f.write_str("built-in defaults"),
        }
    }
}

// ─── Validated course ───────────────────────────────────────────────────────

/// A configuration that passed validation; everything the dashboard needs.
#[derive(Debug, Clone)]
pub struct Course {
    pub title: String,
    pub language: String,
    pub schedule: Schedule,
    pub levels: LevelLadder,
    pub indicator: IndicatorStyle,
}

impl Config {
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        let env = std::env::var_os(ENV_CONFIG).map(PathBuf::from);
        Self::resolve(explicit, env, Self::config_path())
    }

    /// Resolution order: explicit path, `$STUDY_PROGRESS_CONFIG`, the
    /// per-user config file if it exists, then the built-in course.
    fn resolve(
        explicit: Option<&Path>,
        env: Option<PathBuf>,
        default: Option<PathBuf>,
    ) -> Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            return Ok((Self::read(path)?, ConfigSource::File(path.to_path_buf())));
        }

        if let Some(path) = env {
            return Ok((Self::read(&path)?, ConfigSource::File(path)));
        }

        if let Some(path) = default.filter(|p| p.exists()) {
            return Ok((Self::read(&path)?, ConfigSource::File(path)));
        }

        Ok((Self::default(), ConfigSource::BuiltIn))
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn generate_default(target: Option<&Path>) -> Result<PathBuf> {
        let path = match target {
            Some(p) => p.to_path_buf(),
            None => Self::config_path().with_context(|| "Could not determine config directory")?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_str = toml::to_string_pretty(&Self::default())?;
        std::fs::write(&path, toml_str)?;
        Ok(path)
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("study-progress").join("config.toml"))
    }

    pub fn validate(&self) -> Result<Course, ConfigError> {
        let c = &self.course;
        let schedule = Schedule::new(c.start_date, c.end_date, c.hours_per_day, &c.weekdays)?;
        let levels = LevelLadder::new(self.levels.clone())?;

        if !self.indicator.scale.is_finite() || self.indicator.scale < 0.0 {
            return Err(ConfigError::Indicator(format!(
                "scale must be a non-negative number, got {}",
                self.indicator.scale
            )));
        }
        if self.indicator.max_width == 0 {
            return Err(ConfigError::Indicator("max_width must be at least 1".into()));
        }

        let last = levels.last();
        if last.date != schedule.end_date() {
            tracing::warn!(
                level = %last.label,
                level_date = %last.date,
                end_date = %schedule.end_date(),
                "final level is not dated on the course end date"
            );
        }

        Ok(Course {
            title: c.title.clone(),
            language: c.language.clone(),
            schedule,
            levels,
            indicator: self.indicator.clone(),
        })
    }
}

impl Default for Config {
    /// A German course from A0 to B1, four hours every weekday.
    fn default() -> Self {
        let start = NaiveDate::from_ymd_opt(2025, 3, 24).unwrap_or_default();
        let end = NaiveDate::from_ymd_opt(2025, 10, 10).unwrap_or_default();

        let mut levels = vec![LevelThreshold::new("A0", start)];
        let steps = ["A1.1", "A1.2", "A2.1", "A2.2", "B1.1", "B1.2"];
        for (i, label) in steps.iter().enumerate() {
            let offset = Duration::days(20 * (i as i64 + 1));
            levels.push(LevelThreshold::new(*label, start + offset));
        }
        levels.push(LevelThreshold::new("B1", end));

        Self {
            course: CourseConfig {
                title: "German study progress".into(),
                language: "German".into(),
                start_date: start,
                end_date: end,
                hours_per_day: 4.0,
                weekdays: vec![
                    Weekday::Mon,
                    Weekday::Tue,
                    Weekday::Wed,
                    Weekday::Thu,
                    Weekday::Fri,
                ],
            },
            levels,
            indicator: IndicatorStyle::default(),
        }
    }
}
