//! Time zone resolution for schedule documents.
//!
//! Uses ICU4X for Windows timezone ID to IANA mapping and alias canonicalization.

use std::collections::HashMap;
use std::str::FromStr;

use chrono_tz::Tz;
use icu::time::zone::WindowsParser;
use icu::time::zone::iana::IanaParserExtended;

use crate::error::{ScheduleError, ScheduleResult};

/// Resolves zone names found in schedule documents.
///
/// Holds a per-tick cache so each distinct name is parsed once.
#[derive(Debug)]
pub struct ZoneResolver {
    default_zone: Tz,
    cache: HashMap<String, Option<Tz>>,
}

impl ZoneResolver {
    #[must_use]
    pub fn new(default_zone: Tz) -> Self {
        Self {
            default_zone,
            cache: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn default_zone(&self) -> Tz {
        self.default_zone
    }

    /// ## Summary
    /// Resolves a zone name to a `chrono_tz::Tz`.
    ///
    /// ## Errors
    /// Returns `ScheduleError::UnknownTimezone` if the name cannot be resolved.
    ///
    /// ## Side Effects
    /// Caches the outcome, including failures.
    pub fn resolve(&mut self, name: &str) -> ScheduleResult<Tz> {
        if let Some(cached) = self.cache.get(name).copied() {
            return cached.ok_or_else(|| ScheduleError::UnknownTimezone(name.to_string()));
        }

        let resolved = Tz::from_str(name.trim())
            .ok()
            .or_else(|| Tz::from_str(&canonicalize(name.trim())).ok());
        self.cache.insert(name.to_string(), resolved);

        resolved.ok_or_else(|| ScheduleError::UnknownTimezone(name.to_string()))
    }

    /// ## Summary
    /// Resolves a document's optional zone, falling back to the default zone.
    ///
    /// Absent, blank and unresolvable names all yield the default zone.
    pub fn resolve_or_default(&mut self, name: Option<&str>) -> Tz {
        let Some(name) = name.filter(|n| !n.trim().is_empty()) else {
            return self.default_zone;
        };
        match self.resolve(name) {
            Ok(tz) => tz,
            Err(e) => {
                tracing::warn!(error = %e, default = %self.default_zone, "Falling back to default zone");
                self.default_zone
            }
        }
    }
}

/// Maps Windows zone names and IANA aliases to canonical IANA names.
///
/// Returns the input unchanged if ICU does not recognize it.
fn canonicalize(name: &str) -> String {
    let windows_parser = WindowsParser::new();
    if let Some(tz) = windows_parser.parse(name, None) {
        let iana_parser = IanaParserExtended::new();
        for entry in iana_parser.iter() {
            if entry.time_zone == tz {
                return entry.canonical.to_string();
            }
        }
    }

    let iana_parser = IanaParserExtended::new();
    let parsed = iana_parser.parse(name);
    if parsed.time_zone != icu::time::TimeZone::UNKNOWN {
        return parsed.canonical.to_string();
    }

    name.to_string()
}
