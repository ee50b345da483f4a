use thiserror::Error;

/// Schedule computation errors
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

pub type ScheduleResult<T> = std::result::Result<T, ScheduleError>;
