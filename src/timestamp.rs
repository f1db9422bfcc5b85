//! Subtitle timestamp parsing.
//!
//! Search hits carry their position as text in one of a few shapes:
//!
//! - `HH:MM:SS` (hours, minutes, seconds)
//! - `MM:SS` (hours implied as zero)
//! - either of the above with a sub-second fraction on the seconds field,
//!   written with `.` (WebVTT) or `,` (SRT)
//!
//! [`parse`] turns any of those into a [`Timestamp`], whose canonical form is a
//! single non-negative offset in seconds. Anything else is rejected with
//! [`ParseError::InvalidFormat`]; out-of-range fields are never clamped.
//!
//! Offsets are bounded by [`MAX_OFFSET_MS`], the largest millisecond count an
//! `f64` holds exactly (about 2.5 billion hours). Longer offsets are rejected.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const SECS_PER_HOUR: f64 = 3600.0;
const SECS_PER_MINUTE: f64 = 60.0;
const MINUTES_NOT_WHOLE: &str = "minutes field is not a whole number";

/// Largest accepted offset in milliseconds (2^53).
pub const MAX_OFFSET_MS: u64 = 1 << 53;

/// Error returned when a timestamp string is outside the accepted grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid timestamp {raw:?}: {reason}")]
    InvalidFormat {
        /// The string exactly as it was received
        raw: String,
        /// Short description of what was wrong, for diagnostics
        reason: &'static str,
    },
}

impl ParseError {
    fn invalid(raw: &str, reason: &'static str) -> Self {
        Self::InvalidFormat {
            raw: raw.to_string(),
            reason,
        }
    }

    /// The original input that failed to parse.
    pub fn raw(&self) -> &str {
        match self {
            Self::InvalidFormat { raw, .. } => raw,
        }
    }
}

/// A playback position split into its clock fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timestamp {
    hours: u64,
    minutes: u8,
    seconds: f64,
}

impl Timestamp {
    /// Build a timestamp from a canonical offset in seconds.
    ///
    /// The value is rounded to whole milliseconds, which is the precision of
    /// the display form. Negative, non-finite and too large offsets are
    /// rejected.
    pub fn from_secs(secs: f64) -> Result<Self, ParseError> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(ParseError::invalid(
                &secs.to_string(),
                "offset must be a finite, non-negative number of seconds",
            ));
        }

        let Some(total_ms) = offset_ms(secs) else {
            return Err(ParseError::invalid(&secs.to_string(), OFFSET_TOO_LARGE));
        };
        let hours = total_ms / 3_600_000;
        let minutes = ((total_ms / 60_000) % 60) as u8;
        let seconds = (total_ms % 60_000) as f64 / 1000.0;

        Ok(Self {
            hours,
            minutes,
            seconds,
        })
    }

    pub fn hours(&self) -> u64 {
        self.hours
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    /// Canonical offset: `hours * 3600 + minutes * 60 + seconds`.
    pub fn as_secs_f64(&self) -> f64 {
        self.hours as f64 * SECS_PER_HOUR + f64::from(self.minutes) * SECS_PER_MINUTE + self.seconds
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs_f64(self.as_secs_f64())
    }
}

impl fmt::Display for Timestamp {
    /// Normalized `HH:MM:SS.mmm` form. Always re-parses to the same offset
    /// (to the millisecond).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Construction keeps the offset within MAX_OFFSET_MS
        let total_ms = offset_ms(self.as_secs_f64()).unwrap_or(MAX_OFFSET_MS);
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}",
            total_ms / 3_600_000,
            (total_ms / 60_000) % 60,
            (total_ms / 1000) % 60,
            total_ms % 1000
        )
    }
}

impl FromStr for Timestamp {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parse a subtitle timestamp into a [`Timestamp`].
///
/// See the module docs for the accepted grammar.
///
/// # Examples
///
/// ```
/// use subseek::timestamp::parse;
///
/// assert_eq!(parse("01:02:03").unwrap().as_secs_f64(), 3723.0);
/// assert_eq!(parse("00:00:01,500").unwrap().as_secs_f64(), 1.5);
/// assert!(parse("1:2:3:4").is_err());
/// ```
pub fn parse(raw: &str) -> Result<Timestamp, ParseError> {
    let fields: Vec<&str> = raw.trim().split(':').collect();

    let (hours, minutes, seconds) = match fields.as_slice() {
        [h, m, s] => (
            parse_whole(raw, h, "hours field is not a whole number")?,
            parse_whole(raw, m, MINUTES_NOT_WHOLE)?,
            parse_seconds(raw, s)?,
        ),
        [m, s] => (0, parse_whole(raw, m, MINUTES_NOT_WHOLE)?, parse_seconds(raw, s)?),
        _ => return Err(ParseError::invalid(raw, "expected 2 or 3 colon-separated fields")),
    };

    if minutes >= 60 {
        return Err(ParseError::invalid(raw, "minutes out of range"));
    }
    if seconds >= SECS_PER_MINUTE {
        return Err(ParseError::invalid(raw, "seconds out of range"));
    }

    let timestamp = Timestamp {
        hours,
        minutes: minutes as u8,
        seconds,
    };

    if offset_ms(timestamp.as_secs_f64()).is_none() {
        return Err(ParseError::invalid(raw, OFFSET_TOO_LARGE));
    }

    Ok(timestamp)
}

const OFFSET_TOO_LARGE: &str = "offset is too large to represent to the millisecond";

/// Offset rounded to whole milliseconds, or `None` outside `0..=MAX_OFFSET_MS`.
fn offset_ms(secs: f64) -> Option<u64> {
    let ms = (secs * 1000.0).round();
    (ms.is_finite() && ms >= 0.0 && ms <= MAX_OFFSET_MS as f64).then_some(ms as u64)
}

/// Convenience wrapper returning the canonical offset directly.
pub fn parse_secs(raw: &str) -> Result<f64, ParseError> {
    parse(raw).map(|t| t.as_secs_f64())
}

fn parse_whole(raw: &str, field: &str, reason: &'static str) -> Result<u64, ParseError> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::invalid(raw, reason));
    }
    // Digits only, so the only failure left is overflow
    field.parse::<u64>().map_err(|_| ParseError::invalid(raw, reason))
}

fn parse_seconds(raw: &str, field: &str) -> Result<f64, ParseError> {
    // SRT writes the fraction with a comma
    let normalized = field.replace(',', ".");

    let (whole, fraction) = match normalized.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (normalized.as_str(), None),
    };

    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(whole) || !fraction.map_or(true, digits) {
        return Err(ParseError::invalid(raw, "seconds field is not a decimal number"));
    }

    normalized
        .parse::<f64>()
        .map_err(|_| ParseError::invalid(raw, "seconds field is not a decimal number"))
}
