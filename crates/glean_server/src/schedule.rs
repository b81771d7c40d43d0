//! Timer trigger schedules.
//!
//! A [`ScheduleType`] decides when the timer trigger asks the run bot for a
//! new run. Fixed intervals use `tokio::time::interval`; cron expressions are
//! evaluated with the `cron` crate (7 fields: sec min hour day month weekday
//! year).

use chrono::{DateTime, Utc};
use glean_error::{ServerError, ServerErrorKind};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// When the timer trigger fires.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScheduleType {
    /// Cron expression
    ///
    /// Example: "0 0 3 * * * *" = 3 AM daily
    Cron {
        /// Cron expression string
        expression: String,
    },

    /// Fixed interval in seconds, first run at startup
    Interval {
        /// Interval duration in seconds
        seconds: u64,
    },

    /// No timer trigger; runs only happen over HTTP or the CLI
    #[default]
    Disabled,
}

impl ScheduleType {
    /// Check the schedule can be used.
    ///
    /// # Errors
    ///
    /// Returns [`ServerErrorKind::Schedule`] for a zero interval or a cron
    /// expression that does not parse.
    pub fn validate(&self) -> Result<(), ServerError> {
        match self {
            ScheduleType::Interval { seconds: 0 } => Err(ServerError::new(
                ServerErrorKind::Schedule("interval must be at least one second".to_string()),
            )),
            ScheduleType::Cron { expression } => cron::Schedule::from_str(expression)
                .map(|_| ())
                .map_err(|e| {
                    ServerError::new(ServerErrorKind::Schedule(format!(
                        "invalid cron expression '{}': {}",
                        expression, e
                    )))
                }),
            _ => Ok(()),
        }
    }

    /// Whether the timer trigger is active.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, ScheduleType::Disabled)
    }

    /// Calculate the next execution time strictly after `after`.
    ///
    /// Returns `None` for a disabled schedule, an unparsable cron expression
    /// or an exhausted cron schedule.
    pub fn next_execution(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            ScheduleType::Disabled => None,
            ScheduleType::Interval { seconds } => {
                Some(after + chrono::Duration::seconds(i64::try_from(*seconds).ok()?))
            }
            ScheduleType::Cron { expression } => cron::Schedule::from_str(expression)
                .ok()?
                .after(&after)
                .next(),
        }
    }
}

impl std::fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleType::Cron { expression } => write!(f, "cron({})", expression),
            ScheduleType::Interval { seconds } => write!(f, "every {}s", seconds),
            ScheduleType::Disabled => write!(f, "disabled"),
        }
    }
}
