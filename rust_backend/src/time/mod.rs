//! Calendar-to-timeline mapping.
//!
//! - [`working_week`]: storage/display date compression and timeline coordinates
//! - [`business_days`]: Monday-to-Friday counting
//! - [`grid`]: pixel geometry of the gantt canvas

pub mod business_days;
pub mod grid;
pub mod working_week;


pub use business_days::{count_business_days, is_business_day};
pub use grid::{date_to_position, drop_position_to_date, timeline_week_count, TimelineGeometry};
pub use working_week::{
    adjust_for_display, days_between, shift_days, to_display_date, to_storage_date,
    TimelineCoordinate, CALENDAR_DAYS_PER_WEEK, WORKING_DAYS_PER_WEEK,
};
