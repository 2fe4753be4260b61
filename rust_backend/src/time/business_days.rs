use chrono::{Datelike, NaiveDate, Weekday};

use super::working_week::{days_between, CALENDAR_DAYS_PER_WEEK, WORKING_DAYS_PER_WEEK};

/// Monday to Friday.
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Count Monday-to-Friday days in `[start, end]`, both ends included.
///
/// Returns 0 when `end` is before `start`.
pub fn count_business_days(start: NaiveDate, end: NaiveDate) -> i64 {
    if end < start {
        return 0;
    }

    let total = days_between(start, end) + 1;
    let full_weeks = total / CALENDAR_DAYS_PER_WEEK;
    let remainder = total % CALENDAR_DAYS_PER_WEEK;

    // The leftover days start on the same weekday as `start`
    let first = i64::from(start.weekday().num_days_from_monday());
    let tail = (0..remainder)
        .filter(|offset| (first + offset) % CALENDAR_DAYS_PER_WEEK < WORKING_DAYS_PER_WEEK)
        .count() as i64;

    full_weeks * WORKING_DAYS_PER_WEEK + tail
}
