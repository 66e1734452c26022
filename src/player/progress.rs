/// Shown wherever a time is not known yet.
pub const TIME_PLACEHOLDER: &str = "-:--";

/// Elapsed/total labels and bar fill derived from the media clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub elapsed: String,
    pub total: String,
    /// Fill in percent, `None` while the duration is unknown.
    pub percent: Option<f64>,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            elapsed: format_clock(0.0),
            total: TIME_PLACEHOLDER.to_string(),
            percent: None,
        }
    }
}

impl Progress {
    pub fn compute(current: f64, duration: Option<f64>) -> Self {
        let duration = duration.filter(|d| d.is_finite() && *d > 0.0);
        let percent = duration
            .filter(|_| current.is_finite())
            .map(|d| (100.0 * current / d).clamp(0.0, 100.0));
        Self {
            elapsed: format_clock(current),
            total: duration
                .map(format_clock)
                .unwrap_or_else(|| TIME_PLACEHOLDER.to_string()),
            percent,
        }
    }
}

/// `m:ss` with floor division; non-finite or negative input gives the placeholder.
pub fn format_clock(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return TIME_PLACEHOLDER.to_string();
    }
    let whole = secs.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(59.99), "0:59");
        assert_eq!(format_clock(61.2), "1:01");
        assert_eq!(format_clock(3600.0), "60:00");
        assert_eq!(format_clock(f64::NAN), TIME_PLACEHOLDER);
    }

    #[test]
    fn test_unknown_duration_never_divides() {
        for duration in [None, Some(0.0), Some(f64::NAN), Some(f64::INFINITY)] {
            let p = Progress::compute(12.0, duration);
            assert_eq!(p.total, TIME_PLACEHOLDER);
            assert_eq!(p.percent, None);
            assert_eq!(p.elapsed, "0:12");
        }
    }

    #[test]
    fn test_percent_of_known_duration() {
        let p = Progress::compute(45.0, Some(180.0));
        assert_eq!(p.percent, Some(25.0));
        assert_eq!(p.total, "3:00");
    }
}
