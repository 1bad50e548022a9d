//! Resolution of timing strings: `<duration> [<delay>] [<easing>]`.
//!
//! Durations and delays are a number followed by `ms` or `s` (case-insensitive). Easing is a
//! name made of letters and dashes, optionally followed by a parenthesized argument list, e.g.
//! `cubic-bezier(0.1, 0.7, 1.0, 0.1)`.

use crate::{
    dsl::ast::AnimateTimings,
    foundation::core::Scalar,
    foundation::error::AnimationError,
};

/// Resolves a single timing value to milliseconds.
///
/// Numbers are taken as-is. Strings only need a leading `<number>(ms|s)`; anything else
/// resolves to `0`.
pub fn resolve_timing_value(value: &Scalar) -> f64 {
    match value {
        Scalar::Number(n) => *n,
        Scalar::Text(s) => {
            let s = s.trim_start();
            scan_time_prefix(s)
                .and_then(|(num_len, _, unit)| {
                    s[..num_len].parse::<f64>().ok().map(|n| to_ms(n, unit))
                })
                .unwrap_or(0.0)
        }
    }
}

/// Parses a full timing expression.
///
/// Malformed input records [`AnimationError::InvalidTiming`] and yields zero timings. Unless
/// `allow_negative` is set, negative durations/delays are reported too (the parsed values are
/// still returned).
pub fn resolve_timing(
    exp: &str,
    errors: &mut Vec<AnimationError>,
    allow_negative: bool,
) -> AnimateTimings {
    let Some(timings) = parse_time_expression(exp.trim()) else {
        tracing::warn!(value = exp, "unparsable timing expression");
        errors.push(AnimationError::InvalidTiming {
            value: exp.to_string(),
        });
        return AnimateTimings::default();
    };

    if !allow_negative {
        let start = errors.len();
        if timings.duration < 0.0 {
            errors.push(AnimationError::NegativeStepValue);
        }
        if timings.delay < 0.0 {
            errors.push(AnimationError::NegativeDelayValue);
        }
        if errors.len() > start {
            tracing::warn!(value = exp, "negative timing value");
            errors.insert(
                start,
                AnimationError::InvalidTiming {
                    value: exp.to_string(),
                },
            );
        }
    }
    timings
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimeUnit {
    Millis,
    Seconds,
}

fn to_ms(value: f64, unit: TimeUnit) -> f64 {
    match unit {
        TimeUnit::Millis => value,
        TimeUnit::Seconds => value * 1000.0,
    }
}

/// Finds `-?[.\d]+(ms|s)` at the start of `s`: (number length, unit length, unit).
fn scan_time_prefix(s: &str) -> Option<(usize, usize, TimeUnit)> {
    let bytes = s.as_bytes();
    let mut i = 0;
    if bytes.first() == Some(&b'-') {
        i += 1;
    }
    let digits_start = i;
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
        i += 1;
    }
    if i == digits_start {
        return None;
    }
    let rest = &s[i..];
    let lower = rest.get(..2).map(str::to_ascii_lowercase);
    if lower.as_deref() == Some("ms") {
        return Some((i, 2, TimeUnit::Millis));
    }
    match rest.as_bytes().first() {
        Some(b's') | Some(b'S') => Some((i, 1, TimeUnit::Seconds)),
        _ => None,
    }
}

/// Parses a whole token as a time value; the token must end right after the unit.
fn parse_time_token(token: &str) -> Option<f64> {
    let (num_len, unit_len, unit) = scan_time_prefix(token)?;
    if num_len + unit_len != token.len() {
        return None;
    }
    token[..num_len].parse::<f64>().ok().map(|n| to_ms(n, unit))
}

fn split_token(s: &str) -> (&str, &str) {
    match s.find(char::is_whitespace) {
        Some(idx) => (&s[..idx], s[idx..].trim_start()),
        None => (s, ""),
    }
}

fn parse_time_expression(exp: &str) -> Option<AnimateTimings> {
    let (first, mut rest) = split_token(exp);
    let duration = parse_time_token(first)?;

    let mut delay = 0.0;
    if !rest.is_empty() {
        let (second, tail) = split_token(rest);
        if let Some(d) = parse_time_token(second) {
            delay = d;
            rest = tail;
        }
    }

    let easing = if rest.is_empty() {
        None
    } else {
        Some(parse_easing(rest)?.to_string())
    };

    Some(AnimateTimings {
        duration,
        delay,
        easing,
    })
}

fn parse_easing(s: &str) -> Option<&str> {
    let name_len = s
        .bytes()
        .take_while(|b| b.is_ascii_alphabetic() || *b == b'-')
        .count();
    if name_len == 0 {
        return None;
    }
    let args = &s[name_len..];
    if args.is_empty() {
        return Some(s);
    }
    if args.len() > 2 && args.starts_with('(') && args.ends_with(')') {
        return Some(s);
    }
    None
}

#[cfg(test)]
#[path = "../../tests/unit/dsl/timing.rs"]
mod tests;
