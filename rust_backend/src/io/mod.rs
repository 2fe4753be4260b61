//! Snapshot loading.
//!
//! Turns JSON exports of the document store into the data model. Field-level
//! problems (bad dates, numeric strings) are absorbed by the model's lenient
//! deserializers; only structural problems are reported as errors.
//!
//! # Example
//!
//! ```no_run
//! use studio_booking::io::SnapshotLoader;
//! use std::path::Path;
//!
//! let snapshot = SnapshotLoader::load_from_file(Path::new("snapshot.json"))
//!     .expect("Failed to load");
//! println!("Loaded {} projects", snapshot.projects.len());
//! ```

pub mod loaders;


pub use loaders::{SnapshotLoader, StudioSnapshot};
