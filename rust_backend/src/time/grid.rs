//! Pixel geometry of the gantt canvas.
//!
//! The canvas lays out calendar weeks as fixed-width columns subdivided into
//! day columns. These mappings work in calendar-week space directly; they do
//! not pass through the storage-date shift.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::working_week::{days_between, shift_days, CALENDAR_DAYS_PER_WEEK};

/// Rendering constants supplied by the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineGeometry {
    pub week_width_px: f64,
    pub day_width_px: f64,
    pub row_height_px: f64,
}

impl Default for TimelineGeometry {
    fn default() -> Self {
        Self {
            week_width_px: 200.0,
            day_width_px: 40.0,
            row_height_px: 48.0,
        }
    }
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

impl TimelineGeometry {
    pub fn new(week_width_px: f64, day_width_px: f64, row_height_px: f64) -> Self {
        Self {
            week_width_px,
            day_width_px,
            row_height_px,
        }
    }

    /// All widths and the row height are finite and positive.
    pub fn is_valid(&self) -> bool {
        positive(self.week_width_px) && positive(self.day_width_px) && positive(self.row_height_px)
    }

    pub fn drop_position_to_date(&self, pixel_x: f64, project_start: NaiveDate) -> NaiveDate {
        drop_position_to_date(pixel_x, self.week_width_px, self.day_width_px, project_start)
    }

    pub fn date_to_position(&self, date: NaiveDate, project_start: NaiveDate) -> f64 {
        date_to_position(date, project_start, self)
    }

    /// Top edge of the given row.
    pub fn row_top(&self, row_index: usize) -> f64 {
        row_index as f64 * self.row_height_px
    }

    /// Row index under a vertical offset, or `None` above the first row.
    pub fn row_at(&self, pixel_y: f64) -> Option<usize> {
        if !positive(self.row_height_px) || !pixel_y.is_finite() || pixel_y < 0.0 {
            return None;
        }
        Some((pixel_y / self.row_height_px).floor() as usize)
    }
}

/// Map a horizontal drop offset on the canvas to a calendar date.
///
/// `week = floor(x / week_width)`, `day = floor((x mod week_width) / day_width)`,
/// result is `project_start + week * 7 + day` days. Non-finite input or
/// non-positive widths yield `project_start`.
pub fn drop_position_to_date(
    pixel_x: f64,
    week_width_px: f64,
    day_width_px: f64,
    project_start: NaiveDate,
) -> NaiveDate {
    if !pixel_x.is_finite() || !positive(week_width_px) || !positive(day_width_px) {
        log::debug!(
            "ignoring drop at x={} with week_width={} day_width={}",
            pixel_x,
            week_width_px,
            day_width_px
        );
        return project_start;
    }

    let week = (pixel_x / week_width_px).floor() as i64;
    let within_week = pixel_x.rem_euclid(week_width_px);
    // rem_euclid rounds up to the full width for tiny negative offsets
    let day = if within_week >= week_width_px {
        (week_width_px / day_width_px).ceil() as i64 - 1
    } else {
        (within_week / day_width_px).floor() as i64
    };
    let offset = week
        .saturating_mul(CALENDAR_DAYS_PER_WEEK)
        .saturating_add(day);
    shift_days(project_start, offset)
}

/// Left edge of `date` on the canvas, the inverse of [`drop_position_to_date`]
/// for weekdays.
pub fn date_to_position(
    date: NaiveDate,
    project_start: NaiveDate,
    geometry: &TimelineGeometry,
) -> f64 {
    let offset = days_between(project_start, date);
    let week = offset.div_euclid(CALENDAR_DAYS_PER_WEEK);
    let day = offset.rem_euclid(CALENDAR_DAYS_PER_WEEK);
    week as f64 * geometry.week_width_px + day as f64 * geometry.day_width_px
}

/// Number of week columns needed to show `[start, end]`; 0 for an inverted range.
pub fn timeline_week_count(start: NaiveDate, end: NaiveDate) -> i64 {
    if end < start {
        return 0;
    }
    let days = days_between(start, end) + 1;
    (days + CALENDAR_DAYS_PER_WEEK - 1) / CALENDAR_DAYS_PER_WEEK
}
