use std::{
    fmt::Display,
    ops::{Add, AddAssign, Mul, Sub},
};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Seconds since the unix epoch, always UTC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl From<i64> for Timestamp {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Sub<Timestamp> for Timestamp {
    type Output = i64;

    /// Signed difference in seconds.
    fn sub(self, rhs: Self) -> Self::Output {
        self.0.saturating_sub(rhs.0)
    }
}

impl Add<Duration> for Timestamp {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        self.add_seconds(rhs.0 as i64)
    }
}

impl AddAssign<Duration> for Timestamp {
    fn add_assign(&mut self, rhs: Duration) {
        *self = self.add_seconds(rhs.0 as i64)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_rfc3339() {
            Some(value) => f.write_str(&value),
            None => write!(f, "@{}", self.0),
        }
    }
}

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp())
    }

    pub const fn from_unix(secs: i64) -> Self {
        Self(secs)
    }

    pub const fn as_unix(&self) -> i64 {
        self.0
    }

    /// Moves the timestamp by a signed number of seconds, clamping at the
    /// ends of the representable range.
    pub const fn add_seconds(self, seconds: i64) -> Self {
        Self(self.0.saturating_add(seconds))
    }

    /// Formats as `2024-05-01T09:00:00Z`.
    /// None if the timestamp is outside the range chrono can represent.
    pub fn to_rfc3339(&self) -> Option<String> {
        DateTime::<Utc>::from_timestamp(self.0, 0)
            .map(|time| time.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    /// Accepts any RFC 3339 offset, sub-second precision is dropped.
    pub fn from_rfc3339(time: &str) -> Option<Self> {
        let parsed = DateTime::parse_from_rfc3339(time).ok()?;
        Some(Self(parsed.timestamp()))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::from_rfc3339(&value)
            .ok_or_else(|| de::Error::custom(format!("invalid RFC 3339 timestamp: {value}")))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration(u32);

impl From<u32> for Duration {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Duration {
    pub const fn from_seconds(secs: u32) -> Self {
        Self(secs)
    }

    pub const fn from_minutes(minutes: u32) -> Self {
        Self(minutes * 60)
    }

    pub const fn from_hours(hours: u32) -> Self {
        Self(hours * 60 * 60)
    }

    pub const fn from_days(days: u32) -> Self {
        Self(days * 60 * 60 * 24)
    }

    pub const fn as_seconds(&self) -> u32 {
        self.0
    }
}

impl Add for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0
    }
}

impl Mul<u32> for Duration {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Self(self.0.saturating_mul(rhs))
    }
}

#[test]
fn parse_unparse_epoch() {
    let time = "1970-01-01T00:00:00Z";
    let parsed = Timestamp::from_rfc3339(time).unwrap();
    assert_eq!(parsed.as_unix(), 0);
    assert_eq!(parsed.to_rfc3339().unwrap(), time)
}

#[test]
fn parse_offset_normalizes_to_utc() {
    let parsed = Timestamp::from_rfc3339("2024-05-01T11:00:00+02:00").unwrap();
    assert_eq!(parsed.to_rfc3339().unwrap(), "2024-05-01T09:00:00Z")
}
