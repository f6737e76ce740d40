use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_RANGE_FROM: &str = "now-1h";
pub const DEFAULT_RANGE_TO: &str = "now";

/// A user-specified time range, possibly relative (`now-1h`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawTimeRange {
    pub from: String,
    pub to: String,
}

impl RawTimeRange {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl Default for RawTimeRange {
    fn default() -> Self {
        Self::new(DEFAULT_RANGE_FROM, DEFAULT_RANGE_TO)
    }
}

/// A raw range resolved to concrete instants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub raw: RawTimeRange,
}

impl TimeRange {
    pub fn span_ms(&self) -> i64 {
        (self.to - self.from).num_milliseconds().max(0)
    }
}

impl Default for TimeRange {
    /// The default raw range anchored at the epoch; a placeholder until the
    /// first time update of an initialized pane.
    fn default() -> Self {
        let epoch = DateTime::<Utc>::UNIX_EPOCH;
        Self {
            from: epoch - chrono::Duration::hours(1),
            to: epoch,
            raw: RawTimeRange::default(),
        }
    }
}

/// Time zone a user views ranges in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeZone {
    Utc,
    /// The host's local zone.
    #[default]
    Browser,
    /// Fixed offset east of UTC, in minutes.
    Offset(i32),
}

impl TimeZone {
    /// Offset of this zone from UTC at `at`.
    pub fn offset_at(&self, at: DateTime<Utc>) -> FixedOffset {
        let utc = Utc.fix();
        match self {
            TimeZone::Utc => utc,
            TimeZone::Browser => *at.with_timezone(&chrono::Local).offset(),
            TimeZone::Offset(minutes) => minutes
                .checked_mul(60)
                .and_then(FixedOffset::east_opt)
                .unwrap_or(utc),
        }
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeZone::Utc => write!(f, "utc"),
            TimeZone::Browser => write!(f, "browser"),
            TimeZone::Offset(minutes) => {
                let sign = if *minutes < 0 { '-' } else { '+' };
                let abs = minutes.abs();
                write!(f, "{}{:02}:{:02}", sign, abs / 60, abs % 60)
            }
        }
    }
}

impl FromStr for TimeZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "" | "browser" | "local" => return Ok(TimeZone::Browser),
            "utc" | "z" => return Ok(TimeZone::Utc),
            _ => {}
        }

        let (sign, rest) = match s.as_bytes().first() {
            Some(b'+') => (1, &s[1..]),
            Some(b'-') => (-1, &s[1..]),
            _ => return Err(format!("Invalid time zone: {s}")),
        };
        let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
        let hours = offset_component(hours).ok_or_else(|| format!("Invalid time zone offset: {s}"))?;
        let minutes =
            offset_component(minutes).ok_or_else(|| format!("Invalid time zone offset: {s}"))?;
        if hours > 14 || minutes >= 60 {
            return Err(format!("Time zone offset out of range: {s}"));
        }
        Ok(TimeZone::Offset(sign * (hours * 60 + minutes)))
    }
}

// Unsigned one- or two-digit part of a `+HH:MM` offset.
fn offset_component(part: &str) -> Option<i32> {
    if part.is_empty() || part.len() > 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl Serialize for TimeZone {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeZone {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The parts of a user profile the synchronizer reads.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub login: String,
    #[serde(default)]
    pub time_zone: Option<TimeZone>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_zone_display_parse() {
        assert_eq!("UTC".parse::<TimeZone>().unwrap(), TimeZone::Utc);
        assert_eq!("".parse::<TimeZone>().unwrap(), TimeZone::Browser);
        assert_eq!("+02:00".parse::<TimeZone>().unwrap(), TimeZone::Offset(120));
        assert_eq!("-05:30".parse::<TimeZone>().unwrap(), TimeZone::Offset(-330));
        assert_eq!(TimeZone::Offset(-330).to_string(), "-05:30");
        assert!("Mars/Olympus".parse::<TimeZone>().is_err());
    }

    #[test]
    fn signed_or_oversized_offset_parts_are_rejected() {
        assert!("+-5".parse::<TimeZone>().is_err());
        assert!("+-999999999".parse::<TimeZone>().is_err());
        assert!("+999999999".parse::<TimeZone>().is_err());
        assert!("+05:-30".parse::<TimeZone>().is_err());
        assert!("+05:+30".parse::<TimeZone>().is_err());
        assert!("+15".parse::<TimeZone>().is_err());
        assert!("+".parse::<TimeZone>().is_err());
        assert_eq!("+5".parse::<TimeZone>().unwrap(), TimeZone::Offset(300));
    }

    #[test]
    fn out_of_range_offset_falls_back_to_utc() {
        let at = DateTime::<Utc>::UNIX_EPOCH;
        assert_eq!(TimeZone::Offset(i32::MAX).offset_at(at).local_minus_utc(), 0);
    }

    #[test]
    fn fixed_offset_is_honoured() {
        let at = DateTime::<Utc>::UNIX_EPOCH;
        assert_eq!(TimeZone::Offset(90).offset_at(at).local_minus_utc(), 5400);
        assert_eq!(TimeZone::Utc.offset_at(at).local_minus_utc(), 0);
    }
}
