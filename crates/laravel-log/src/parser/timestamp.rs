use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use super::model::ParseError;

/// Layout of the date and time inside the header brackets.
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Zone a parsed timestamp is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTimezone {
    /// Explicit offset written in the log line (`+02:00`)
    Offset(FixedOffset),
    /// Configured default zone, used when the line carries no offset
    Named(Tz),
}

impl LogTimezone {
    pub fn name(&self) -> String {
        match self {
            LogTimezone::Offset(offset) => offset.to_string(),
            LogTimezone::Named(tz) => tz.name().to_string(),
        }
    }
}

/// Timestamp components captured from the header, still as text.
#[derive(Debug, Clone, Copy)]
pub struct RawTimestamp<'a> {
    /// `YYYY-MM-DD HH:MM:SS`
    pub datetime: &'a str,
    /// Six fractional digits, if present
    pub micros: Option<&'a str>,
    /// `±HH:MM`, if present
    pub offset: Option<&'a str>,
}

impl RawTimestamp<'_> {
    /// Resolve the components into an instant.
    ///
    /// With an explicit offset the wall clock stays in that offset. Without
    /// one, the wall clock is UTC and the instant is shown in `default_tz`,
    /// or left in UTC when none is set.
    pub fn resolve(
        &self,
        default_tz: Option<Tz>,
    ) -> Result<(DateTime<FixedOffset>, LogTimezone), ParseError> {
        let naive = self.naive()?;

        match self.offset {
            Some(offset) => {
                let offset = parse_offset(offset).ok_or_else(|| self.invalid("offset out of range"))?;
                let datetime = offset
                    .from_local_datetime(&naive)
                    .single()
                    .ok_or_else(|| self.invalid("not representable in offset"))?;
                Ok((datetime, LogTimezone::Offset(offset)))
            }
            None => {
                let tz = default_tz.unwrap_or(Tz::UTC);
                let datetime = Utc.from_utc_datetime(&naive).with_timezone(&tz);
                Ok((datetime.fixed_offset(), LogTimezone::Named(tz)))
            }
        }
    }

    fn naive(&self) -> Result<NaiveDateTime, ParseError> {
        let naive = NaiveDateTime::parse_from_str(self.datetime, DATETIME_FORMAT)
            .map_err(|e| self.invalid(&e.to_string()))?;

        match self.micros {
            Some(digits) => {
                let micros: u32 = digits
                    .parse()
                    .map_err(|_| self.invalid("invalid fractional seconds"))?;
                naive
                    .with_nanosecond(micros * 1_000)
                    .ok_or_else(|| self.invalid("invalid fractional seconds"))
            }
            None => Ok(naive),
        }
    }

    fn invalid(&self, reason: &str) -> ParseError {
        let mut timestamp = self.datetime.to_string();
        if let Some(micros) = self.micros {
            timestamp.push('.');
            timestamp.push_str(micros);
        }
        if let Some(offset) = self.offset {
            timestamp.push_str(offset);
        }
        ParseError::InvalidTimestamp {
            timestamp,
            reason: reason.to_string(),
        }
    }
}

/// Parse `+HH:MM` / `-HH:MM`.
fn parse_offset(text: &str) -> Option<FixedOffset> {
    let sign = match text.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let (hours, minutes) = text.get(1..)?.split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
