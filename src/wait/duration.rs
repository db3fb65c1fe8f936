// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Duration strings as written in resource configuration (`30s`, `1m30s`, `-1s`).

use crate::constants::wait::{DEFAULT_TIMEOUT, UNBOUNDED_CEILING};
use crate::error::{ProviderError, Result};
use std::time::Duration;

/// How long a convergence wait may run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeout {
    /// Check exactly once and never sleep
    Immediate,
    /// Wait up to the given duration
    After(Duration),
    /// Written as a negative duration; capped at one week
    Unbounded,
}

impl Timeout {
    pub fn parse(input: &str) -> Result<Self> {
        let (negative, duration) = parse_signed(input)?;
        Ok(if negative && !duration.is_zero() {
            Timeout::Unbounded
        } else {
            Timeout::from_duration(duration)
        })
    }

    pub fn from_duration(duration: Duration) -> Self {
        if duration.is_zero() {
            Timeout::Immediate
        } else {
            Timeout::After(duration)
        }
    }

    /// The effective wall-clock limit, `None` when no waiting happens at all
    pub fn limit(&self) -> Option<Duration> {
        match self {
            Timeout::Immediate => None,
            Timeout::After(duration) => Some(*duration),
            Timeout::Unbounded => Some(UNBOUNDED_CEILING),
        }
    }
}

impl Default for Timeout {
    fn default() -> Self {
        Timeout::After(DEFAULT_TIMEOUT)
    }
}

/// Parse a poll interval, which must be strictly positive
pub fn parse_poll_interval(input: &str) -> Result<Duration> {
    match parse_signed(input)? {
        (false, duration) if !duration.is_zero() => Ok(duration),
        _ => Err(ProviderError::InvalidDuration(format!(
            "poll interval must be positive, got '{}'",
            input
        ))),
    }
}

/// Parse a Go style duration into its sign and magnitude
fn parse_signed(input: &str) -> Result<(bool, Duration)> {
    let invalid = || ProviderError::InvalidDuration(input.to_string());

    let trimmed = input.trim();
    let (negative, mut rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    if rest == "0" {
        return Ok((negative, Duration::ZERO));
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total = Duration::ZERO;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if number_len == 0 {
            return Err(invalid());
        }
        let value: f64 = rest[..number_len].parse().map_err(|_| invalid())?;
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let unit_secs = match &rest[..unit_len] {
            "ns" => 1e-9,
            "us" | "µs" => 1e-6,
            "ms" => 1e-3,
            "s" => 1.0,
            "m" => 60.0,
            "h" => 3600.0,
            _ => return Err(invalid()),
        };
        rest = &rest[unit_len..];

        let part = Duration::try_from_secs_f64(value * unit_secs).map_err(|_| invalid())?;
        total = total.checked_add(part).ok_or_else(invalid)?;
    }

    Ok((negative, total))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_units() {
        assert_eq!(
            Timeout::parse("30s").unwrap(),
            Timeout::After(Duration::from_secs(30))
        );
        assert_eq!(
            Timeout::parse("5m").unwrap(),
            Timeout::After(Duration::from_secs(300))
        );
        assert_eq!(
            Timeout::parse("250ms").unwrap(),
            Timeout::After(Duration::from_millis(250))
        );
    }

    #[test]
    fn test_parse_compound_duration() {
        assert_eq!(
            Timeout::parse("1h2m3s").unwrap(),
            Timeout::After(Duration::from_secs(3723))
        );
    }

    #[test]
    fn test_parse_fractional_duration() {
        assert_eq!(
            Timeout::parse("1.5s").unwrap(),
            Timeout::After(Duration::from_millis(1500))
        );
    }

    #[test]
    fn test_zero_is_immediate() {
        assert_eq!(Timeout::parse("0").unwrap(), Timeout::Immediate);
        assert_eq!(Timeout::parse("0s").unwrap(), Timeout::Immediate);
        assert_eq!(Timeout::parse("-0s").unwrap(), Timeout::Immediate);
        assert_eq!(Timeout::Immediate.limit(), None);
    }

    #[test]
    fn test_negative_is_unbounded_with_week_ceiling() {
        let timeout = Timeout::parse("-1s").unwrap();
        assert_eq!(timeout, Timeout::Unbounded);
        assert_eq!(
            timeout.limit(),
            Some(Duration::from_secs(7 * 24 * 60 * 60))
        );
    }

    #[test]
    fn test_invalid_durations() {
        for input in ["", "-", "s", "10", "10x", "1.2.3s", "abc"] {
            assert!(
                matches!(Timeout::parse(input), Err(ProviderError::InvalidDuration(_))),
                "expected '{}' to be rejected",
                input
            );
        }
    }

    #[test]
    fn test_overflowing_sum_is_rejected() {
        let input = "10000000000000000000s10000000000000000000s";
        assert!(matches!(
            Timeout::parse(input),
            Err(ProviderError::InvalidDuration(_))
        ));
        assert!(parse_poll_interval(input).is_err());
    }

    #[test]
    fn test_poll_interval_must_be_positive() {
        assert_eq!(parse_poll_interval("5s").unwrap(), Duration::from_secs(5));
        assert!(parse_poll_interval("0s").is_err());
        assert!(parse_poll_interval("-5s").is_err());
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(Timeout::default(), Timeout::After(Duration::from_secs(30)));
    }
}
