//! Data model for artists, projects and bookings.
//!
//! Records are deserialized from documents exported by the external store.
//! Deserialization is deliberately lenient (see [`serde_helpers`]).

pub mod macros;
pub mod artist;
pub mod booking;
pub mod project;
pub mod serde_helpers;

pub use artist::{Artist, ArtistDirectory, ArtistId, ContactLinks};
pub use booking::{inclusive_day_count, Booking, BookingId, ProjectId};
pub use project::{Delivery, Project};
