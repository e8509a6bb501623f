use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A server timestamp (`CreatedAt`/`UpdatedAt`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    /// Formats for display, e.g. `Jan 5, 2024, 10:30 AM` or `January 5, 2024`.
    #[must_use]
    pub fn display(&self, include_time: bool) -> String {
        if include_time {
            self.0.format("%b %-d, %Y, %I:%M %p").to_string()
        } else {
            self.0.format("%B %-d, %Y").to_string()
        }
    }

    /// Short `H:MM` label used on chart axes.
    #[must_use]
    pub fn chart_label(&self) -> String {
        format!("{}:{:02}", self.0.hour(), self.0.minute())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display(true))
    }
}

/// Formats an optional timestamp, yielding `N/A` when it is missing.
#[must_use]
pub fn format_date(timestamp: Option<&Timestamp>, include_time: bool) -> String {
    timestamp.map_or_else(|| "N/A".to_string(), |ts| ts.display(include_time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Timestamp {
        Timestamp(Utc.with_ymd_and_hms(2024, 1, 5, 10, 30, 0).unwrap())
    }

    #[test]
    fn display_with_and_without_time() {
        assert_eq!(sample().display(true), "Jan 5, 2024, 10:30 AM");
        assert_eq!(sample().display(false), "January 5, 2024");
    }

    #[test]
    fn chart_label_pads_minutes_only() {
        let ts = Timestamp(Utc.with_ymd_and_hms(2024, 1, 5, 7, 4, 0).unwrap());
        assert_eq!(ts.chart_label(), "7:04");
    }

    #[test]
    fn missing_date_is_not_available() {
        assert_eq!(format_date(None, true), "N/A");
        assert_eq!(format_date(Some(&sample()), false), "January 5, 2024");
    }

    #[test]
    fn deserializes_offset_timestamps() {
        let ts: Timestamp = serde_json::from_str("\"2024-01-05T12:30:00+02:00\"").unwrap();
        assert_eq!(ts, sample());
    }
}
