use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::serde_helpers::{lenient_number, lenient_string, lenient_tags};
use crate::define_id_type;

define_id_type!(ArtistId);

/// Contact links stored alongside an artist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactLinks {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
}

/// An artist record, read-only from the point of view of this crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    pub id: ArtistId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    /// Daily rate; absent when the record was saved without one.
    #[serde(default, deserialize_with = "lenient_number")]
    pub daily_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub country: String,
    #[serde(default, deserialize_with = "lenient_tags")]
    pub skills: Vec<String>,
    #[serde(flatten)]
    pub contact: ContactLinks,
    #[serde(default)]
    pub favorite: bool,
}

impl Artist {
    pub fn new(id: impl Into<String>, name: impl Into<String>, daily_rate: f64) -> Self {
        Self {
            id: ArtistId::new(id),
            name: name.into(),
            daily_rate: Some(daily_rate),
            ..Default::default()
        }
    }

    /// Usable daily rate: positive and finite, otherwise `None`.
    pub fn effective_rate(&self) -> Option<f64> {
        self.daily_rate.filter(|r| r.is_finite() && *r > 0.0)
    }
}

/// Read-only lookup of artists by id.
#[derive(Debug, Clone, Default)]
pub struct ArtistDirectory {
    by_id: HashMap<ArtistId, Artist>,
}

impl ArtistDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &ArtistId) -> Option<&Artist> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl FromIterator<Artist> for ArtistDirectory {
    fn from_iter<I: IntoIterator<Item = Artist>>(iter: I) -> Self {
        Self {
            by_id: iter.into_iter().map(|a| (a.id.clone(), a)).collect(),
        }
    }
}

impl<'a> FromIterator<&'a Artist> for ArtistDirectory {
    fn from_iter<I: IntoIterator<Item = &'a Artist>>(iter: I) -> Self {
        iter.into_iter().cloned().collect()
    }
}
