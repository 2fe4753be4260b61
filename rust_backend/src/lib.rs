//! # Studio Booking Core
//!
//! Scheduling and cost logic behind the studio booking dashboard.
//!
//! The dashboard tracks artists, projects and bookings of artists onto
//! projects. Persistence lives in an external document store and rendering in
//! the UI layer; this crate holds the pure computations both of them call:
//!
//! - [`time`]: mapping between calendar dates, storage dates and the
//!   five-slot "working week" timeline grid, plus canvas geometry
//! - [`costs`]: booking cost, per-artist grouping, project financials
//! - [`models`]: artists, projects, bookings and deliveries
//! - [`io`]: loading snapshots exported from the document store
//! - [`config`]: timeline geometry and cost policy from TOML
//! - [`error`]: error types and the optional diagnostics channel
//!
//! Every computation takes its inputs explicitly and holds no state, so the
//! same snapshot always produces the same figures.

pub mod config;
pub mod costs;
pub mod error;
pub mod io;
pub mod models;
pub mod time;

pub use config::DashboardConfig;
pub use error::{CoreError, CoreResult, Diagnostics, Issue, IssueKind};
