//! Default list titles derived from the current week.

use chrono::{Datelike, Duration, Local, NaiveDate};

/// Builds the label for the Monday-start week containing `date`.
///
/// Format: `"{year} W{iso week:02} {Monday: Month day}-{Sunday: day}"`,
/// e.g. `"2024 W03 January 15-21"`. The year is the calendar year of `date`,
/// so 2024-12-31 is `"2024 W01 December 30-5"`.
pub fn default_list_title(date: NaiveDate) -> String {
    let week = date.iso_week();
    let start = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    let end = start + Duration::days(6);
    format!(
        "{} W{:02} {}-{}",
        date.year(),
        week.week(),
        start.format("%B %-d"),
        end.format("%-d")
    )
}

/// Title for a list created today, in local time.
pub fn current_week_title() -> String {
    default_list_title(Local::now().date_naive())
}
