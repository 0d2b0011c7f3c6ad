//! Compact duration parsing
//!
//! Record durations are written as concatenated `<number><unit>` components,
//! e.g. `1h30m`, `0h5m` or `1.5h`, with an optional leading sign. Supported
//! units are `ns`, `us` (`µs`, `μs`), `ms`, `s`, `m` and `h`. The bare literal
//! `0` needs no unit. Values are held as signed nanoseconds and must fit in
//! an `i64`.

use chrono::TimeDelta;
use thiserror::Error;

const NANOS_PER_SECOND: i128 = 1_000_000_000;
const NANOS_PER_HOUR: i128 = 3_600 * NANOS_PER_SECOND;

/// Largest magnitude a parsed duration may reach (2^63 nanoseconds)
const MAGNITUDE_LIMIT: u64 = 1 << 63;

/// Errors produced by [`parse_duration`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("invalid duration {0:?}")]
    Invalid(String),

    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    #[error("unknown unit {unit:?} in duration {text:?}")]
    UnknownUnit { unit: String, text: String },
}

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(1),
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(60 * 1_000_000_000),
        "h" => Some(3_600 * 1_000_000_000),
        _ => None,
    }
}

/// Parse a compact duration expression such as `1h30m` into a [`TimeDelta`].
pub fn parse_duration(text: &str) -> Result<TimeDelta, DurationError> {
    let invalid = || DurationError::Invalid(text.to_string());

    let (negative, mut rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    if rest == "0" {
        return Ok(TimeDelta::zero());
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;

    while !rest.is_empty() {
        let first = rest.as_bytes()[0];
        if !(first == b'.' || first.is_ascii_digit()) {
            return Err(invalid());
        }

        let (whole, after_whole) = leading_int(rest).ok_or_else(invalid)?;
        let has_whole = after_whole.len() != rest.len();
        rest = after_whole;

        let mut fraction = 0u64;
        let mut scale = 1.0f64;
        let mut has_fraction = false;
        if let Some(after_dot) = rest.strip_prefix('.') {
            let (digits, digit_scale, after_fraction) = leading_fraction(after_dot);
            has_fraction = after_fraction.len() != after_dot.len();
            fraction = digits;
            scale = digit_scale;
            rest = after_fraction;
        }

        if !has_whole && !has_fraction {
            return Err(invalid());
        }

        let unit_end = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        if unit_end == 0 {
            return Err(DurationError::MissingUnit(text.to_string()));
        }
        let unit = &rest[..unit_end];
        rest = &rest[unit_end..];

        let nanos = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_string(),
            text: text.to_string(),
        })?;

        if whole > MAGNITUDE_LIMIT / nanos {
            return Err(invalid());
        }
        let mut component = whole * nanos;
        if fraction > 0 {
            let fraction_nanos = (fraction as f64 * (nanos as f64 / scale)) as u64;
            component = component.saturating_add(fraction_nanos);
            if component > MAGNITUDE_LIMIT {
                return Err(invalid());
            }
        }

        total = total.saturating_add(component);
        if total > MAGNITUDE_LIMIT {
            return Err(invalid());
        }
    }

    let nanos = if negative {
        // 2^63 wraps to i64::MIN, which is representable
        (total as i64).wrapping_neg()
    } else {
        i64::try_from(total).map_err(|_| invalid())?
    };

    Ok(TimeDelta::nanoseconds(nanos))
}

/// Consume leading decimal digits. `None` on overflow.
fn leading_int(s: &str) -> Option<(u64, &str)> {
    let end = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut value: u64 = 0;
    for digit in s[..end].bytes() {
        if value > MAGNITUDE_LIMIT / 10 {
            return None;
        }
        value = value * 10 + u64::from(digit - b'0');
        if value > MAGNITUDE_LIMIT {
            return None;
        }
    }
    Some((value, &s[end..]))
}

/// Consume the digits after a decimal point. Digits past the precision
/// limit are dropped but still consumed.
fn leading_fraction(s: &str) -> (u64, f64, &str) {
    let end = s.bytes().take_while(u8::is_ascii_digit).count();
    let mut value: u64 = 0;
    let mut scale = 1.0f64;
    let mut overflow = false;
    for digit in s[..end].bytes() {
        if overflow {
            continue;
        }
        if value > (MAGNITUDE_LIMIT - 1) / 10 {
            overflow = true;
            continue;
        }
        let next = value * 10 + u64::from(digit - b'0');
        if next > MAGNITUDE_LIMIT {
            overflow = true;
            continue;
        }
        value = next;
        scale *= 10.0;
    }
    (value, scale, &s[end..])
}

/// Span length in fractional hours.
///
/// Whole hours and the sub-hour remainder are converted separately so long
/// spans keep their nanosecond precision.
pub fn hours(duration: TimeDelta) -> f64 {
    let total = i128::from(duration.num_seconds()) * NANOS_PER_SECOND
        + i128::from(duration.subsec_nanos());
    let whole = total / NANOS_PER_HOUR;
    let rest = total % NANOS_PER_HOUR;
    whole as f64 + rest as f64 / NANOS_PER_HOUR as f64
}
