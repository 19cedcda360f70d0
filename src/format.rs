//! Display formatting for lap times

/// Format a duration in milliseconds as `M:SS:D` (minutes, zero-padded
/// seconds, one decisecond digit)
///
/// Minutes are unpadded and unbounded. Precision below a decisecond is
/// discarded, matching the display granularity of the timer readout.
///
/// # Example
/// ```
/// use photogate::format::format_time;
///
/// assert_eq!(format_time(0), "0:00:0");
/// assert_eq!(format_time(61234), "1:01:2");
/// ```
pub fn format_time(millis: u64) -> String {
    let deciseconds = (millis / 100) % 10;
    let total_seconds = millis / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}:{}", minutes, seconds, deciseconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_formats_as_reset_display() {
        assert_eq!(format_time(0), "0:00:0");
    }

    #[test]
    fn test_minutes_seconds_deciseconds() {
        assert_eq!(format_time(61234), "1:01:2");
        assert_eq!(format_time(599_999), "9:59:9");
        assert_eq!(format_time(600_000), "10:00:0");
    }

    #[test]
    fn test_sub_decisecond_precision_discarded() {
        assert_eq!(format_time(99), "0:00:0");
        assert_eq!(format_time(100), "0:00:1");
        assert_eq!(format_time(199), "0:00:1");
    }

    #[test]
    fn test_minutes_unpadded_and_unbounded() {
        assert_eq!(format_time(60_000), "1:00:0");
        assert_eq!(format_time(3_600_000), "60:00:0");
        assert_eq!(format_time(6_000_000), "100:00:0");
    }
}
