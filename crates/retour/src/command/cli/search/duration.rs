use core::fmt;
use std::{ops::ControlFlow, time::Duration};

use time::OffsetDateTime;

/// Formats a `Duration` into a human-readable string, showing only the
/// most significant time unit.
///
/// Examples:
/// - 125 seconds -> "2m"
/// - 60 seconds -> "1m"
/// - 5 seconds -> "5s"
/// - 0 duration -> "0s"
///
/// Sub-second precision is dropped: record timestamps are whole seconds.
pub fn format_duration(f: Duration) -> String {
    struct F(Duration);
    impl fmt::Display for F {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            format_duration_into(self.0, f)
        }
    }
    F(f).to_string()
}

/// How long ago `then` was, relative to `now`, formatted like [`format_duration`].
///
/// Timestamps in the future (clock skew between shells) show as "0s".
pub fn format_age(then: OffsetDateTime, now: OffsetDateTime) -> String {
    let elapsed = (now - then).max(time::Duration::ZERO);
    format_duration(elapsed.try_into().unwrap_or_default())
}

fn format_duration_into(dur: Duration, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fn item(unit: &'static str, value: u64) -> ControlFlow<(&'static str, u64)> {
        if value > 0 {
            ControlFlow::Break((unit, value))
        } else {
            ControlFlow::Continue(())
        }
    }

    /// Find the largest non-zero unit of `secs`.
    ///
    /// Based on the `humantime` crate:
    /// <https://github.com/tailhook/humantime/blob/master/src/duration.rs#L295-L331>
    fn largest_unit(secs: u64) -> ControlFlow<(&'static str, u64), ()> {
        let years = secs / 31_557_600; // 365.25d
        let year_days = secs % 31_557_600;
        let months = year_days / 2_630_016; // 30.44d
        let month_days = year_days % 2_630_016;
        let days = month_days / 86400;
        let day_secs = month_days % 86400;
        let hours = day_secs / 3600;
        let minutes = day_secs % 3600 / 60;
        let seconds = day_secs % 60;

        // `?` returns early on the first non-zero unit.
        item("y", years)?;
        item("mo", months)?;
        item("d", days)?;
        item("h", hours)?;
        item("m", minutes)?;
        item("s", seconds)?;
        ControlFlow::Continue(())
    }

    match largest_unit(dur.as_secs()) {
        ControlFlow::Break((unit, value)) => write!(f, "{value}{unit}"),
        ControlFlow::Continue(()) => write!(f, "0s"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_significant_unit_only() {
        assert_eq!(format_duration(Duration::from_secs(0)), "0s");
        assert_eq!(format_duration(Duration::from_secs(5)), "5s");
        assert_eq!(format_duration(Duration::from_secs(60)), "1m");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m");
        assert_eq!(format_duration(Duration::from_secs(3 * 3600 + 59)), "3h");
        assert_eq!(format_duration(Duration::from_secs(2 * 86400)), "2d");
        assert_eq!(format_duration(Duration::from_secs(4 * 86400 + 7200)), "4d");
        assert_eq!(format_duration(Duration::from_secs(40 * 86400)), "1mo");
        assert_eq!(format_duration(Duration::from_secs(400 * 86400)), "1y");
    }

    #[test]
    fn test_sub_second_is_zero() {
        assert_eq!(format_duration(Duration::from_millis(500)), "0s");
    }

    #[test]
    fn test_format_age() {
        let now = OffsetDateTime::from_unix_timestamp(1_710_084_600).unwrap();
        let then = OffsetDateTime::from_unix_timestamp(1_710_084_600 - 90).unwrap();
        assert_eq!(format_age(then, now), "1m");
        assert_eq!(format_age(now, now), "0s");
        // Future timestamps clamp to zero.
        assert_eq!(format_age(now, then), "0s");
    }
}
