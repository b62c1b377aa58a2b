//! Time-span parsing and formatting
//!
//! Configuration files express timeouts as `[d.]hh:mm:ss[.fffffff]` strings
//! (for example `"00:00:05"`), or in the shorter `250ms` / `5s` / `2m` / `1h`
//! forms. A bare number is read as seconds.

use std::fmt;
use std::time::Duration;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

/// Parse a time-span string into a [`Duration`]
pub fn parse_timespan(input: &str) -> Result<Duration, String> {
    let value = input.trim();
    if value.is_empty() {
        return Err("time span cannot be empty".to_string());
    }
    if value.starts_with('-') {
        return Err(format!("time span '{}' cannot be negative", value));
    }

    if value.contains(':') {
        return parse_clock(value);
    }

    let (number, unit_secs) = if let Some(n) = value.strip_suffix("ms") {
        (n, 0.001)
    } else if let Some(n) = value.strip_suffix('s') {
        (n, 1.0)
    } else if let Some(n) = value.strip_suffix('m') {
        (n, SECONDS_PER_MINUTE as f64)
    } else if let Some(n) = value.strip_suffix('h') {
        (n, SECONDS_PER_HOUR as f64)
    } else {
        (value, 1.0)
    };

    let amount: f64 = number
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a valid time span", value))?;
    seconds_to_duration(amount * unit_secs, value)
}

fn seconds_to_duration(seconds: f64, original: &str) -> Result<Duration, String> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(format!("'{}' is not a valid time span", original));
    }
    Duration::try_from_secs_f64(seconds).map_err(|e| format!("'{}': {}", original, e))
}

/// `[d.]hh:mm[:ss[.fraction]]`
fn parse_clock(value: &str) -> Result<Duration, String> {
    let invalid = || format!("'{}' is not a valid time span", value);

    let (days, clock) = match value.split_once(':') {
        Some((head, _)) if head.contains('.') => {
            let (days, rest) = value.split_once('.').ok_or_else(invalid)?;
            (parse_component(days, u64::MAX).ok_or_else(invalid)?, rest)
        }
        _ => (0, value),
    };

    let parts: Vec<&str> = clock.split(':').collect();
    if parts.len() < 2 || parts.len() > 3 {
        return Err(invalid());
    }

    let hours = parse_component(parts[0], 23).ok_or_else(invalid)?;
    let minutes = parse_component(parts[1], 59).ok_or_else(invalid)?;
    let (seconds, nanos) = match parts.get(2) {
        Some(part) => {
            let (whole, fraction) = part.split_once('.').unwrap_or((part, ""));
            let seconds = parse_component(whole, 59).ok_or_else(invalid)?;
            (seconds, parse_fraction(fraction).ok_or_else(invalid)?)
        }
        None => (0, 0),
    };

    let total = days
        .checked_mul(SECONDS_PER_DAY)
        .and_then(|d| d.checked_add(hours * SECONDS_PER_HOUR + minutes * SECONDS_PER_MINUTE))
        .and_then(|d| d.checked_add(seconds))
        .ok_or_else(invalid)?;

    Ok(Duration::new(total, nanos))
}

fn parse_component(part: &str, max: u64) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse::<u64>().ok().filter(|v| *v <= max)
}

fn parse_fraction(fraction: &str) -> Option<u32> {
    if fraction.is_empty() {
        return Some(0);
    }
    if !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // nanosecond precision, extra digits are truncated
    let digits: String = fraction.chars().chain(std::iter::repeat('0')).take(9).collect();
    digits.parse().ok()
}

/// Format a [`Duration`] as `[d.]hh:mm:ss[.fffffff]`
pub fn format_timespan(duration: Duration) -> String {
    let total = duration.as_secs();
    let days = total / SECONDS_PER_DAY;
    let hours = (total % SECONDS_PER_DAY) / SECONDS_PER_HOUR;
    let minutes = (total % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = total % SECONDS_PER_MINUTE;

    let mut out = String::new();
    if days > 0 {
        out.push_str(&format!("{}.", days));
    }
    out.push_str(&format!("{:02}:{:02}:{:02}", hours, minutes, seconds));

    let ticks = duration.subsec_nanos() / 100;
    if ticks > 0 {
        out.push_str(&format!(".{:07}", ticks));
    }
    out
}

/// Serde adapter for `Duration` fields stored as time-span strings
pub mod serde_timespan {
    use super::{format_timespan, parse_timespan};
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_timespan(*duration))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TimespanVisitor)
    }

    struct TimespanVisitor;

    impl Visitor<'_> for TimespanVisitor {
        type Value = Duration;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a time span string such as \"00:00:05\" or a number of seconds")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Duration, E> {
            parse_timespan(value).map_err(E::custom)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Duration, E> {
            Ok(Duration::from_secs(value))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Duration, E> {
            u64::try_from(value)
                .map(Duration::from_secs)
                .map_err(|_| E::custom("time span cannot be negative"))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Duration, E> {
            super::seconds_to_duration(value, &value.to_string()).map_err(E::custom)
        }
    }
}

/// Display wrapper used in log fields
pub struct Timespan(pub Duration);

impl fmt::Display for Timespan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_timespan(self.0))
    }
}
