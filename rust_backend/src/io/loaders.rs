use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::CoreError;
use crate::models::{Artist, ArtistDirectory, Booking, Project, ProjectId};

/// Projects and artists exported from the document store at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudioSnapshot {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub artists: Vec<Artist>,
    /// Top-level bookings whose `projectId` matched no project.
    #[serde(default)]
    pub unassigned_bookings: Vec<Booking>,
}

impl StudioSnapshot {
    pub fn artist_directory(&self) -> ArtistDirectory {
        self.artists.iter().collect()
    }

    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    /// Every booking owned by a project.
    pub fn bookings(&self) -> impl Iterator<Item = &Booking> {
        self.projects.iter().flat_map(|p| p.bookings.iter())
    }
}

/// Raw document layout: bookings may be nested or listed at the top level.
#[derive(Debug, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    projects: Vec<Project>,
    #[serde(default)]
    artists: Vec<Artist>,
    #[serde(default)]
    bookings: Vec<Booking>,
}

impl RawSnapshot {
    fn into_snapshot(self) -> StudioSnapshot {
        let mut projects = self.projects;

        for project in &mut projects {
            for booking in &mut project.bookings {
                if booking.project_id.as_str().is_empty() {
                    booking.project_id = project.id.clone();
                }
            }
        }

        let mut unassigned_bookings = Vec::new();
        for booking in self.bookings {
            match projects.iter_mut().find(|p| p.id == booking.project_id) {
                Some(project) => project.bookings.push(booking),
                None => unassigned_bookings.push(booking),
            }
        }

        if !unassigned_bookings.is_empty() {
            log::warn!(
                "{} booking(s) reference unknown projects and were left unassigned",
                unassigned_bookings.len()
            );
        }

        StudioSnapshot {
            projects,
            artists: self.artists,
            unassigned_bookings,
        }
    }
}

/// Loads [`StudioSnapshot`]s from JSON exports.
pub struct SnapshotLoader;

impl SnapshotLoader {
    /// Load a snapshot from a JSON file
    pub fn load_from_file(path: &Path) -> Result<StudioSnapshot> {
        let content = fs::read_to_string(path)
            .map_err(CoreError::from)
            .with_context(|| format!("Failed to read snapshot file {}", path.display()))?;

        Self::load_from_str(&content)
            .with_context(|| format!("Failed to parse snapshot file {}", path.display()))
    }

    /// Load a snapshot from a JSON string
    ///
    /// The document must be a JSON object; arrays are not read positionally.
    pub fn load_from_str(json_str: &str) -> Result<StudioSnapshot> {
        let document: serde_json::Value = serde_json::from_str(json_str)
            .map_err(|e| CoreError::parse("", e.to_string()))?;
        if !document.is_object() {
            return Err(CoreError::parse("", "expected a JSON object at the top level").into());
        }

        let raw: RawSnapshot = serde_path_to_error::deserialize(document)
            .map_err(|e| CoreError::parse(e.path().to_string(), e.inner().to_string()))?;

        let snapshot = raw.into_snapshot();
        log::info!(
            "Loaded snapshot: {} projects, {} artists, {} bookings",
            snapshot.projects.len(),
            snapshot.artists.len(),
            snapshot.bookings().count()
        );
        Ok(snapshot)
    }
}
