//! Error and diagnostic types.
//!
//! Core computations never fail: malformed input degrades to a zero or
//! neutral value. Callers that want to know *why* a figure came out as zero
//! can opt into a [`Diagnostics`] sink, which collects [`Issue`] values.
//! Fallible ambient operations (configuration and snapshot loading) report
//! through [`CoreError`].

use chrono::NaiveDate;
use std::fmt;

/// Result type for configuration and loading operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Error type for the fallible edges of the crate.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Configuration file is missing, unreadable, or holds invalid values.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Filesystem access failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A document could not be parsed.
    #[error("Parse error at {path}: {message}")]
    Parse { path: String, message: String },
}

impl CoreError {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a parse error pointing at a document path (e.g. `projects[0].budget`).
    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A data-quality problem that was tolerated while computing a figure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Issue {
    /// The booking ends before it starts; it contributes nothing.
    #[error("booking {booking_id}: end date {end} is before start date {start}")]
    InvalidDateRange {
        booking_id: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    /// The booking is missing a start or end date (or it was malformed).
    #[error("booking {booking_id}: missing or malformed start/end date")]
    MissingDate { booking_id: String },

    /// No daily rate could be resolved for the booking's artist.
    #[error("booking {booking_id}: no daily rate for artist {artist_id}")]
    MissingReferenceData {
        booking_id: String,
        artist_id: String,
    },
}

impl Issue {
    /// Short machine-readable category, matching the error taxonomy.
    pub fn kind(&self) -> IssueKind {
        match self {
            Issue::InvalidDateRange { .. } | Issue::MissingDate { .. } => {
                IssueKind::InvalidDateRange
            }
            Issue::MissingReferenceData { .. } => IssueKind::MissingReferenceData,
        }
    }
}

/// Coarse issue category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    InvalidDateRange,
    MissingReferenceData,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::InvalidDateRange => write!(f, "invalid_date_range"),
            IssueKind::MissingReferenceData => write!(f, "missing_reference_data"),
        }
    }
}

/// Opt-in collector for tolerated data-quality issues.
///
/// Every recorded issue is also emitted on the `log` facade at debug level.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    issues: Vec<Issue>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, issue: Issue) {
        log::debug!("tolerated data issue ({}): {}", issue.kind(), issue);
        self.issues.push(issue);
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Number of recorded issues of the given kind.
    pub fn count(&self, kind: IssueKind) -> usize {
        self.issues.iter().filter(|i| i.kind() == kind).count()
    }
}
