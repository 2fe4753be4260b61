use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::artist::{Artist, ArtistId};
use super::serde_helpers::{lenient_date, lenient_joined_tags, lenient_number, lenient_opt_string};
use crate::define_id_type;

define_id_type!(BookingId);
define_id_type!(ProjectId);

/// An assignment of one artist to one project for an inclusive date range.
///
/// `artist_name`, `daily_rate`, `skills` and `country` are snapshots taken
/// when the booking was created. They are not refreshed when the artist
/// record changes afterwards, so they may be stale; the aggregator prefers
/// the snapshot rate because that is the rate the booking was agreed at.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    #[serde(default)]
    pub artist_id: ArtistId,
    #[serde(default)]
    pub project_id: ProjectId,
    #[serde(default, deserialize_with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub end_date: Option<NaiveDate>,

    // Snapshot-at-booking-time fields
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub artist_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub daily_rate: Option<f64>,
    /// Comma-joined skill tags; an array in the document is joined on load.
    #[serde(default, deserialize_with = "lenient_joined_tags")]
    pub skills: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub country: Option<String>,
}

impl Booking {
    pub fn new(
        id: impl Into<String>,
        artist_id: impl Into<String>,
        project_id: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: BookingId::new(id),
            artist_id: ArtistId::new(artist_id),
            project_id: ProjectId::new(project_id),
            start_date: Some(start_date),
            end_date: Some(end_date),
            ..Default::default()
        }
    }

    /// Copy the artist's current name, rate, skills and country onto the booking.
    pub fn with_artist_snapshot(mut self, artist: &Artist) -> Self {
        self.artist_id = artist.id.clone();
        self.artist_name = Some(artist.name.clone());
        self.daily_rate = artist.daily_rate;
        self.skills = (!artist.skills.is_empty()).then(|| artist.skills.join(", "));
        self.country = (!artist.country.is_empty()).then(|| artist.country.clone());
        self
    }

    pub fn with_daily_rate(mut self, rate: f64) -> Self {
        self.daily_rate = Some(rate);
        self
    }

    pub fn with_artist_name(mut self, name: impl Into<String>) -> Self {
        self.artist_name = Some(name.into());
        self
    }

    pub fn with_skills(mut self, skills: impl Into<String>) -> Self {
        self.skills = Some(skills.into());
        self
    }

    /// Both dates, when present.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.start_date?, self.end_date?))
    }

    /// Inclusive day count, or `None` when a date is missing or the range is inverted.
    pub fn duration_days(&self) -> Option<i64> {
        let (start, end) = self.date_range()?;
        inclusive_day_count(start, end)
    }

    /// Whether the booking covers `date` (inclusive on both ends).
    pub fn covers(&self, date: NaiveDate) -> bool {
        matches!(self.date_range(), Some((start, end)) if start <= date && date <= end)
    }
}

/// `end - start + 1`, or `None` when `end` is before `start`.
pub fn inclusive_day_count(start: NaiveDate, end: NaiveDate) -> Option<i64> {
    let days = (end - start).num_days() + 1;
    (days >= 1).then_some(days)
}
