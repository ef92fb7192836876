use std::fmt::{Display, Formatter};

use chrono::Duration;
use serde::Deserialize;

use crate::errors::LedgerError;
use crate::vault::VaultReadable;

const MAX_OFFSET_MINUTES: i64 = 12 * 60;

/// A named, fixed offset from UTC.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "TimeZoneVaultValue")]
pub struct TimeZone {
    name: String,
    offset: Duration,
}

impl TimeZone {
    pub fn new(name: &str, offset_hours: i32, offset_minutes: i32) -> Result<TimeZone, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::InvalidTimezone(
                "Timezone name cannot be empty".to_string(),
            ));
        }

        if !(-59..=59).contains(&offset_minutes) {
            return Err(LedgerError::InvalidTimezone(format!(
                "Offset minutes must be between -59 and 59, got {}",
                offset_minutes
            )));
        }

        let total_minutes = offset_hours as i64 * 60 + offset_minutes as i64;
        if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&total_minutes) {
            return Err(LedgerError::InvalidTimezone(format!(
                "Offset must be between -12:00 and +12:00, got {}:{:02}",
                offset_hours,
                offset_minutes.abs()
            )));
        }

        Ok(TimeZone {
            name: name.to_string(),
            offset: Duration::minutes(total_minutes),
        })
    }

    pub fn utc() -> TimeZone {
        TimeZone {
            name: "UTC".to_string(),
            offset: Duration::zero(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn offset(&self) -> Duration {
        self.offset
    }
}

impl Display for TimeZone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let minutes = self.offset.num_minutes();
        let sign = if minutes < 0 { '-' } else { '+' };
        write!(
            f,
            "{}({}{:02}:{:02})",
            self.name,
            sign,
            minutes.abs() / 60,
            minutes.abs() % 60
        )
    }
}

#[derive(Deserialize)]
pub struct TimeZoneVaultValue {
    name: String,
    offset_hours: i32,
    #[serde(default)]
    offset_minutes: i32,
}

impl TryFrom<TimeZoneVaultValue> for TimeZone {
    type Error = LedgerError;

    fn try_from(value: TimeZoneVaultValue) -> Result<Self, Self::Error> {
        TimeZone::new(&value.name, value.offset_hours, value.offset_minutes)
    }
}

pub type TimeZonesVaultValue = Option<Vec<TimeZone>>;
impl VaultReadable for TimeZonesVaultValue {
    const KEY: &'static str = "timezones";
}
