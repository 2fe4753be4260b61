//! Working-week compression between calendar time and the timeline grid.
//!
//! The timeline shows five slots per week. Three representations of a day
//! are in play:
//!
//! - **display date**: `project_start + slot_index` days, i.e. the grid with
//!   weekends squeezed out;
//! - **storage date**: the calendar date a slot is persisted as, where every
//!   five slots consume seven calendar days;
//! - **timeline coordinate**: the `(week, day)` pair itself.
//!
//! All divisions are floored. Every divisor here is positive, so
//! `div_euclid`/`rem_euclid` give exactly floor semantics, including for
//! dates before the project start (`-1` days is week `-1`, day `4`).

use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

/// Slots shown per timeline week.
pub const WORKING_DAYS_PER_WEEK: i64 = 5;
/// Calendar days consumed by one timeline week.
pub const CALENDAR_DAYS_PER_WEEK: i64 = 7;

/// Signed day offset of `date` from `origin`.
pub fn days_between(origin: NaiveDate, date: NaiveDate) -> i64 {
    (date - origin).num_days()
}

/// `origin + days`, saturating at the ends of the representable range.
pub fn shift_days(origin: NaiveDate, days: i64) -> NaiveDate {
    TimeDelta::try_days(days)
        .and_then(|delta| origin.checked_add_signed(delta))
        .unwrap_or(if days < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        })
}

/// A `(week, day)` position in a project's five-slot timeline grid.
///
/// `day` is always in `0..5`. Out-of-range parts passed to [`new`](Self::new)
/// or read from a document carry over into the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "CoordinateParts")]
pub struct TimelineCoordinate {
    week: i64,
    day: u8,
}

#[derive(Deserialize)]
struct CoordinateParts {
    week: i64,
    day: i64,
}

impl From<CoordinateParts> for TimelineCoordinate {
    fn from(parts: CoordinateParts) -> Self {
        Self::new(parts.week, parts.day)
    }
}

impl TimelineCoordinate {
    /// Coordinate for `day` slots into `week`, normalized so `day` is in `0..5`.
    pub fn new(week: i64, day: i64) -> Self {
        Self::from_slot_index(week.saturating_mul(WORKING_DAYS_PER_WEEK).saturating_add(day))
    }

    pub fn week(&self) -> i64 {
        self.week
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    /// Build a coordinate from a linear slot index (`week * 5 + day`).
    pub fn from_slot_index(slot: i64) -> Self {
        Self {
            week: slot.div_euclid(WORKING_DAYS_PER_WEEK),
            day: slot.rem_euclid(WORKING_DAYS_PER_WEEK) as u8,
        }
    }

    pub fn slot_index(&self) -> i64 {
        self.week
            .saturating_mul(WORKING_DAYS_PER_WEEK)
            .saturating_add(i64::from(self.day))
    }

    /// Coordinate of a display date: one slot per day since the origin.
    pub fn from_display_date(date: NaiveDate, project_start: NaiveDate) -> Self {
        Self::from_slot_index(days_between(project_start, date))
    }

    /// Coordinate of a storage date.
    ///
    /// Saturday and Sunday (calendar offsets 5 and 6 within a week) are
    /// clamped to offset 5, which normalizes to the first slot of the
    /// following week.
    pub fn from_storage_date(date: NaiveDate, project_start: NaiveDate) -> Self {
        let total = days_between(project_start, date);
        let week = total.div_euclid(CALENDAR_DAYS_PER_WEEK);
        let day = total.rem_euclid(CALENDAR_DAYS_PER_WEEK).min(WORKING_DAYS_PER_WEEK);
        Self::from_slot_index(week * WORKING_DAYS_PER_WEEK + day)
    }

    pub fn to_display_date(&self, project_start: NaiveDate) -> NaiveDate {
        shift_days(project_start, self.slot_index())
    }

    pub fn to_storage_date(&self, project_start: NaiveDate) -> NaiveDate {
        let offset = self
            .week
            .saturating_mul(CALENDAR_DAYS_PER_WEEK)
            .saturating_add(i64::from(self.day));
        shift_days(project_start, offset)
    }
}

/// Spread a display date onto calendar weeks for persistence.
///
/// `weeks = floor(d / 5)`, `day = d mod 5`, result is
/// `project_start + weeks * 7 + day` where `d = date - project_start`.
pub fn to_storage_date(date: NaiveDate, project_start: NaiveDate) -> NaiveDate {
    TimelineCoordinate::from_display_date(date, project_start).to_storage_date(project_start)
}

/// Compress a storage date back onto the five-slot grid.
///
/// `weeks = floor(t / 7)`, `day = min(t mod 7, 5)`, result is
/// `project_start + weeks * 5 + day` where `t = date - project_start`.
pub fn to_display_date(date: NaiveDate, project_start: NaiveDate) -> NaiveDate {
    TimelineCoordinate::from_storage_date(date, project_start).to_display_date(project_start)
}

/// Summary-view compression: subtract two days per elapsed calendar week.
///
/// Agrees with [`to_display_date`] on weekday storage dates but not on
/// Sundays or on dates before the project start; summary rows depend on
/// this exact rule, so the two are kept apart.
pub fn adjust_for_display(date: NaiveDate, project_start: NaiveDate) -> NaiveDate {
    let weeks = days_between(project_start, date).div_euclid(CALENDAR_DAYS_PER_WEEK);
    shift_days(date, weeks.saturating_mul(-2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // 2024-01-01 is a Monday
    fn start() -> NaiveDate {
        date(2024, 1, 1)
    }

    #[test]
    fn test_storage_date_within_first_week() {
        assert_eq!(to_storage_date(start(), start()), start());
        assert_eq!(to_storage_date(date(2024, 1, 5), start()), date(2024, 1, 5));
    }

    #[test]
    fn test_storage_date_skips_weekend() {
        // Sixth slot lands on the following Monday
        assert_eq!(to_storage_date(date(2024, 1, 6), start()), date(2024, 1, 8));
        assert_eq!(to_storage_date(date(2024, 1, 11), start()), date(2024, 1, 15));
    }

    #[test]
    fn test_storage_date_before_start_uses_floor() {
        // -1 slot is week -1, day 4: the Friday before
        assert_eq!(to_storage_date(date(2023, 12, 31), start()), date(2023, 12, 29));
        // -5 slots is week -1, day 0
        assert_eq!(to_storage_date(date(2023, 12, 27), start()), date(2023, 12, 25));
    }

    #[test]
    fn test_display_date_compresses_weeks() {
        assert_eq!(to_display_date(date(2024, 1, 8), start()), date(2024, 1, 6));
        assert_eq!(to_display_date(date(2024, 1, 15), start()), date(2024, 1, 11));
        assert_eq!(to_display_date(date(2024, 1, 3), start()), date(2024, 1, 3));
    }

    #[test]
    fn test_display_date_collapses_weekend_onto_next_week() {
        let monday_slot = to_display_date(date(2024, 1, 8), start());
        assert_eq!(to_display_date(date(2024, 1, 6), start()), monday_slot);
        assert_eq!(to_display_date(date(2024, 1, 7), start()), monday_slot);
    }

    #[test]
    fn test_display_date_before_start() {
        // Sunday before the start: week -1, offset 6 clamped to 5 => slot 0
        assert_eq!(to_display_date(date(2023, 12, 31), start()), start());
        // Friday before the start: week -1, offset 4 => slot -1
        assert_eq!(to_display_date(date(2023, 12, 29), start()), date(2023, 12, 31));
    }

    #[test]
    fn test_adjust_for_display_week_zero_unchanged() {
        for day in 1..=7 {
            let d = date(2024, 1, day);
            assert_eq!(adjust_for_display(d, start()), d);
        }
    }

    #[test]
    fn test_adjust_for_display_subtracts_two_per_week() {
        assert_eq!(adjust_for_display(date(2024, 1, 8), start()), date(2024, 1, 6));
        assert_eq!(adjust_for_display(date(2024, 1, 22), start()), date(2024, 1, 16));
    }

    #[test]
    fn test_adjust_for_display_diverges_from_display_date() {
        // Sunday of week 1
        let sunday = date(2024, 1, 14);
        assert_eq!(adjust_for_display(sunday, start()), date(2024, 1, 12));
        assert_eq!(to_display_date(sunday, start()), date(2024, 1, 11));

        // Before the start, floor gives week -1 and adds two days back
        let before = date(2023, 12, 31);
        assert_eq!(adjust_for_display(before, start()), date(2024, 1, 2));
        assert_eq!(to_display_date(before, start()), start());
    }

    #[test]
    fn test_coordinate_round_trip() {
        let coord = TimelineCoordinate::new(3, 2);
        assert_eq!(coord.slot_index(), 17);
        assert_eq!(coord.to_storage_date(start()), date(2024, 1, 24));
        assert_eq!(coord.to_display_date(start()), date(2024, 1, 18));
        assert_eq!(
            TimelineCoordinate::from_storage_date(date(2024, 1, 24), start()),
            coord
        );
        assert_eq!(
            TimelineCoordinate::from_display_date(date(2024, 1, 18), start()),
            coord
        );
    }

    #[test]
    fn test_coordinate_negative_slots() {
        assert_eq!(
            TimelineCoordinate::from_slot_index(-1),
            TimelineCoordinate::new(-1, 4)
        );
        assert_eq!(
            TimelineCoordinate::from_slot_index(-5),
            TimelineCoordinate::new(-1, 0)
        );
        assert_eq!(
            TimelineCoordinate::from_slot_index(-6),
            TimelineCoordinate::new(-2, 4)
        );
    }

    #[test]
    fn test_coordinate_normalizes_day() {
        let coord = TimelineCoordinate::new(1, 7);
        assert_eq!((coord.week(), coord.day()), (2, 2));
        assert_eq!(TimelineCoordinate::new(0, -1), TimelineCoordinate::new(-1, 4));
    }

    #[test]
    fn test_coordinate_deserialize_normalizes_day() {
        let coord: TimelineCoordinate = serde_json::from_str(r#"{"week": 0, "day": 9}"#).unwrap();
        assert_eq!((coord.week(), coord.day()), (1, 4));
        assert_eq!(coord.to_storage_date(start()), date(2024, 1, 12));

        let json = serde_json::to_string(&coord).unwrap();
        assert_eq!(json, r#"{"week":1,"day":4}"#);
    }

    #[test]
    fn test_shift_days_saturates() {
        assert_eq!(shift_days(start(), i64::MAX), NaiveDate::MAX);
        assert_eq!(shift_days(start(), i64::MIN), NaiveDate::MIN);
        assert_eq!(shift_days(start(), 10), date(2024, 1, 11));
    }
}
