//! Spaced-repetition recap scheduling.
//!
//! An item learned on day `d` is resurfaced on `d+1`, `d+3`, `d+7`, `d+15` and
//! `d+30`. The schedule is computed once when the item is created and stored
//! with it; everything here is a pure function of its inputs and never reads
//! the clock. Callers resolve "today" themselves.

use chrono::{Days, NaiveDate};

use crate::error::{Error, Result};
use crate::models::{LearningItem, ScheduleDay};

/// Offsets, in days, from the learning date to each recap.
pub const RECAP_INTERVALS: [u64; 5] = [1, 3, 7, 15, 30];

/// Calendar date wire format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Longest window `upcoming_schedule` will walk.
pub const MAX_SCHEDULE_DAYS: u32 = 366;

/// Parse a `YYYY-MM-DD` calendar date.
///
/// Only the ten-character form is accepted; chrono alone would also take
/// signed and five-digit years.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    let well_formed = trimmed.len() == 10
        && trimmed.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(Error::Parse(format!("'{}' is not a YYYY-MM-DD date", s)));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|e| Error::Parse(format!("'{}' is not a YYYY-MM-DD date: {}", s, e)))
}

/// Parse an optional date, falling back to `today` when absent or blank.
pub fn parse_date_or(s: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    match s.map(str::trim) {
        Some(s) if !s.is_empty() => parse_date(s),
        _ => Ok(today),
    }
}

/// The five recap dates for an item learned on `learned_on`, ascending.
///
/// Fails if any recap would fall past the last representable date.
pub fn compute_recap_dates(learned_on: NaiveDate) -> Result<Vec<NaiveDate>> {
    RECAP_INTERVALS
        .iter()
        .map(|&days| {
            learned_on.checked_add_days(Days::new(days)).ok_or_else(|| {
                Error::Parse(format!("{} is too late to schedule recaps", learned_on))
            })
        })
        .collect()
}

/// Items with a recap on `target`, in store order.
///
/// Completion state is ignored: an item already reviewed on `target` is still
/// due on `target`.
pub fn find_due(items: &[LearningItem], target: NaiveDate) -> Vec<LearningItem> {
    items
        .iter()
        .filter(|item| item.is_due_on(target))
        .cloned()
        .collect()
}

/// Every day in `[from, from + days)` with at least one recap, ascending.
///
/// `days` is capped at [`MAX_SCHEDULE_DAYS`].
pub fn upcoming_schedule(
    items: &[LearningItem],
    from: NaiveDate,
    days: u32,
) -> Result<Vec<ScheduleDay>> {
    if days > MAX_SCHEDULE_DAYS {
        return Err(Error::Validation(format!(
            "days must be at most {}, got {}",
            MAX_SCHEDULE_DAYS, days
        )));
    }
    Ok(from
        .iter_days()
        .take(days as usize)
        .filter_map(|date| {
            let due = find_due(items, date);
            (!due.is_empty()).then_some(ScheduleDay { date, items: due })
        })
        .collect())
}
