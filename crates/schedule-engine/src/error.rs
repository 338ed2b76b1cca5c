//! Error types for schedule-engine parsing.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Unknown day: {0}")]
    UnknownDay(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
