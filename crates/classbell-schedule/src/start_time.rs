//! Class start times written as `"HH:MM"` local wall-clock text.

use std::fmt;

/// Local wall-clock start of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StartTime {
    hour: u32,
    minute: u32,
}

impl StartTime {
    /// Used whenever the start time is missing or malformed.
    pub const DEFAULT: Self = Self { hour: 7, minute: 0 };

    /// Returns `None` unless `hour < 24` and `minute < 60`.
    #[must_use]
    pub const fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    #[must_use]
    pub const fn hour(self) -> u32 {
        self.hour
    }

    #[must_use]
    pub const fn minute(self) -> u32 {
        self.minute
    }

    /// ## Summary
    /// Parses `"H:MM"` or `"HH:MM"`; a bare hour means minute zero.
    ///
    /// Returns `None` for empty, non-numeric or out-of-range text.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.trim().split(':');
        let hour = parts.next()?.trim().parse::<u32>().ok()?;
        let minute = match parts.next() {
            Some(minute) => minute.trim().parse::<u32>().ok()?,
            None => 0,
        };
        if parts.next().is_some() {
            return None;
        }
        Self::new(hour, minute)
    }

    /// ## Summary
    /// Parses an optional start time, falling back to 07:00.
    ///
    /// Malformed input is not an error; it resolves to [`StartTime::DEFAULT`].
    #[must_use]
    pub fn parse_or_default(text: Option<&str>) -> Self {
        let Some(text) = text else {
            return Self::DEFAULT;
        };
        Self::parse(text).unwrap_or_else(|| {
            tracing::debug!(start = %text, "Malformed start time, defaulting to 07:00");
            Self::DEFAULT
        })
    }
}

impl Default for StartTime {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for StartTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
