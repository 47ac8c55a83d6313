//! Unix timestamp conversion

use chrono::{DateTime, Utc};

use super::ToolResult;
use crate::core::{Action, NotifyLevel};

const DATE_FORMAT: &str = "%-d %b %Y";
const DATE_TIME_FORMAT: &str = "%-d %b %Y %H:%M:%S";

/// Convert a unix timestamp to a human readable date
pub fn timestamp(input: Option<String>) -> Action {
    let input = input.map(|s| s.trim().to_string());

    match input.as_deref() {
        None | Some("") | Some("now") => {
            let now = Utc::now().timestamp();
            date_rows(now)
        }
        Some(s) => match s.parse::<i64>() {
            Ok(ts) => date_rows(ts),
            Err(_) => {
                Action::Notify(format!("Cannot parse timestamp: {}", s), NotifyLevel::Error)
            }
        },
    }
}

fn date_rows(ts: i64) -> Action {
    match (timestamp_to_date(ts), timestamp_to_date_time(ts)) {
        (Some(date), Some(date_time)) => ToolResult::new("Timestamp")
            .add("unix", ts.to_string())
            .add("date", date)
            .add("date_time", date_time)
            .into_action(),
        _ => Action::error(format!("Timestamp out of range: {}", ts)),
    }
}

/// `1709647389` -> `5 Mar 2024` (UTC)
pub fn timestamp_to_date(ts: i64) -> Option<String> {
    format_utc(ts, DATE_FORMAT)
}

/// `1709647389` -> `5 Mar 2024 14:03:09` (UTC)
pub fn timestamp_to_date_time(ts: i64) -> Option<String> {
    format_utc(ts, DATE_TIME_FORMAT)
}

fn format_utc(ts: i64, format: &str) -> Option<String> {
    DateTime::<Utc>::from_timestamp(ts, 0).map(|dt| dt.format(format).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(timestamp_to_date(0).as_deref(), Some("1 Jan 1970"));
        assert_eq!(timestamp_to_date(1709647389).as_deref(), Some("5 Mar 2024"));
        assert_eq!(
            timestamp_to_date_time(1709647389).as_deref(),
            Some("5 Mar 2024 14:03:09")
        );
        assert!(timestamp_to_date(i64::MAX).is_none());
    }

    #[test]
    fn test_timestamp_action() {
        let action = timestamp(Some("1704067200".to_string()));
        assert_eq!(
            action,
            Action::Show {
                title: "Timestamp".to_string(),
                rows: vec![
                    ("unix".to_string(), "1704067200".to_string()),
                    ("date".to_string(), "1 Jan 2024".to_string()),
                    ("date_time".to_string(), "1 Jan 2024 00:00:00".to_string()),
                ],
            }
        );
        assert!(timestamp(Some("yesterday".to_string())).is_error());
    }
}
