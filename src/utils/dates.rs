use crate::error::Result;
use crate::utils::constants::{DATE_FORMAT, RECENT_WINDOW_DAYS};
use chrono::{Duration, NaiveDate};

/// First date inside the recent window ending at `max_date`.
pub fn window_cutoff(max_date: &str) -> Result<String> {
    let latest = NaiveDate::parse_from_str(max_date, DATE_FORMAT)?;
    let cutoff = latest - Duration::days(RECENT_WINDOW_DAYS);
    Ok(cutoff.format(DATE_FORMAT).to_string())
}
