//! Date windows for the stats fetch.

use chrono::{Days, NaiveDate};
use tracing::warn;

use crate::error::StatsError;

/// Wire format of dates in stats URLs and on the command line.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate, StatsError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|source| StatsError::InvalidDate {
        value: value.to_string(),
        source,
    })
}

/// Formats a date the way the stats service expects it.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Returns the inclusive, chronological list of days to fetch.
///
/// With both `start` and `end` the range spans them (swapped if reversed).
/// Otherwise it is the `lookback_days` days ending the day before `today`.
///
/// ## Examples
///
/// ```
/// use builder_sync::dates::{date_range, format_date};
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// let days = date_range(Some("2024-01-03"), Some("2024-01-01"), 7, today).unwrap();
/// let days: Vec<String> = days.into_iter().map(format_date).collect();
///
/// assert_eq!(days, ["2024-01-01", "2024-01-02", "2024-01-03"]);
/// ```
pub fn date_range(
    start: Option<&str>,
    end: Option<&str>,
    lookback_days: u32,
    today: NaiveDate,
) -> Result<Vec<NaiveDate>, StatsError> {
    match (start, end) {
        (Some(start), Some(end)) => {
            let start = parse_date(start)?;
            let end = parse_date(end)?;
            let (first, last) = if start > end { (end, start) } else { (start, end) };
            Ok(first.iter_days().take_while(|day| *day <= last).collect())
        }
        (start, end) => {
            if start.is_some() || end.is_some() {
                warn!("Both --start and --end are required for an explicit range; using lookback window");
            }
            Ok(lookback_window(today, lookback_days))
        }
    }
}

fn lookback_window(today: NaiveDate, lookback_days: u32) -> Vec<NaiveDate> {
    let Some(yesterday) = today.pred_opt() else {
        return Vec::new();
    };

    (0..u64::from(lookback_days))
        .rev()
        .filter_map(|offset| yesterday.checked_sub_days(Days::new(offset)))
        .collect()
}
