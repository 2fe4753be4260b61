use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::error::{Diagnostics, Issue};
use crate::models::serde_helpers::split_tags;
use crate::models::{Artist, ArtistDirectory, Booking};

fn usable_rate(rate: Option<f64>) -> Option<f64> {
    rate.filter(|r| r.is_finite() && *r > 0.0)
}

/// `daily_rate * inclusive day count`.
///
/// Zero when the rate is absent or not positive, a date is missing, or the
/// range is inverted.
pub fn booking_cost(booking: &Booking, daily_rate: Option<f64>) -> f64 {
    match (usable_rate(daily_rate), booking.duration_days()) {
        (Some(rate), Some(days)) => rate * days as f64,
        _ => 0.0,
    }
}

/// Rate a booking is charged at: its own snapshot first, then the live artist.
pub fn resolve_daily_rate(booking: &Booking, artists: &ArtistDirectory) -> Option<f64> {
    usable_rate(booking.daily_rate).or_else(|| {
        artists
            .get(&booking.artist_id)
            .and_then(Artist::effective_rate)
    })
}

/// Cost of a booking with its rate resolved, reporting why it is zero.
pub fn resolved_booking_cost(
    booking: &Booking,
    artists: &ArtistDirectory,
    diagnostics: &mut Diagnostics,
) -> f64 {
    let Some((start, end)) = booking.date_range() else {
        diagnostics.record(Issue::MissingDate {
            booking_id: booking.id.to_string(),
        });
        return 0.0;
    };
    if end < start {
        diagnostics.record(Issue::InvalidDateRange {
            booking_id: booking.id.to_string(),
            start,
            end,
        });
        return 0.0;
    }
    let rate = resolve_daily_rate(booking, artists);
    if rate.is_none() {
        diagnostics.record(Issue::MissingReferenceData {
            booking_id: booking.id.to_string(),
            artist_id: booking.artist_id.to_string(),
        });
    }
    booking_cost(booking, rate)
}

/// Display name a booking is grouped under.
///
/// Live artist name, then the booking's name snapshot, then the raw id.
pub fn artist_display_name(booking: &Booking, artists: &ArtistDirectory) -> String {
    artists
        .get(&booking.artist_id)
        .map(|a| a.name.trim())
        .filter(|name| !name.is_empty())
        .or_else(|| {
            booking
                .artist_name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
        })
        .unwrap_or(booking.artist_id.as_str())
        .to_string()
}

/// Aggregated bookings of one artist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtistCostSummary {
    pub bookings: Vec<Booking>,
    pub total_cost: f64,
    pub skills: BTreeSet<String>,
    pub country: Option<String>,
}

/// Per-artist summaries keyed by display name, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtistCostGroups {
    entries: Vec<(String, ArtistCostSummary)>,
    index: HashMap<String, usize>,
}

impl ArtistCostGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Summary for `name`, created empty on first access.
    pub fn entry(&mut self, name: &str) -> &mut ArtistCostSummary {
        let position = match self.index.get(name) {
            Some(&position) => position,
            None => {
                self.entries
                    .push((name.to_string(), ArtistCostSummary::default()));
                self.index.insert(name.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[position].1
    }

    pub fn get(&self, name: &str) -> Option<&ArtistCostSummary> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArtistCostSummary)> {
        self.entries.iter().map(|(name, s)| (name.as_str(), s))
    }

    /// Sum of every group's total.
    pub fn total_cost(&self) -> f64 {
        self.entries.iter().map(|(_, s)| s.total_cost).sum()
    }

    pub fn into_vec(self) -> Vec<(String, ArtistCostSummary)> {
        self.entries
    }
}

impl FromIterator<(String, ArtistCostSummary)> for ArtistCostGroups {
    fn from_iter<I: IntoIterator<Item = (String, ArtistCostSummary)>>(iter: I) -> Self {
        let mut groups = Self::new();
        for (name, summary) in iter {
            *groups.entry(&name) = summary;
        }
        groups
    }
}

/// Group bookings by artist display name and total their cost.
///
/// Two artists sharing a display name end up in the same group.
pub fn group_by_artist(bookings: &[Booking], artists: &ArtistDirectory) -> ArtistCostGroups {
    group_by_artist_with_diagnostics(bookings, artists, &mut Diagnostics::new())
}

pub fn group_by_artist_with_diagnostics(
    bookings: &[Booking],
    artists: &ArtistDirectory,
    diagnostics: &mut Diagnostics,
) -> ArtistCostGroups {
    let mut groups = ArtistCostGroups::new();

    for booking in bookings {
        let name = artist_display_name(booking, artists);
        let cost = resolved_booking_cost(booking, artists, diagnostics);

        let summary = groups.entry(&name);
        summary.total_cost += cost;
        summary.bookings.push(booking.clone());
        if let Some(skills) = booking.skills.as_deref() {
            summary
                .skills
                .extend(split_tags(skills).map(str::to_string));
        }
        if summary.country.is_none() {
            summary.country = artists
                .get(&booking.artist_id)
                .map(|a| a.country.trim())
                .filter(|c| !c.is_empty())
                .or_else(|| booking.country.as_deref().map(str::trim).filter(|c| !c.is_empty()))
                .map(str::to_string);
        }
    }

    groups
}

/// Order groups by total cost, highest first; equal totals keep their order.
pub fn sort_artists_by_cost(groups: ArtistCostGroups) -> Vec<(String, ArtistCostSummary)> {
    let mut sorted = groups.into_vec();
    sorted.sort_by(|a, b| b.1.total_cost.total_cmp(&a.1.total_cost));
    sorted
}
