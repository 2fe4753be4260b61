//! Booking cost aggregation.
//!
//! Every function here is a pure computation over a caller-supplied snapshot
//! of bookings and artists. Bad data never fails a computation: it
//! contributes zero, and the `*_with_diagnostics` variants report why.
//!
//! - [`aggregator`]: per-booking cost and per-artist grouping
//! - [`financials`]: per-project and portfolio totals

pub mod aggregator;
pub mod financials;

pub use aggregator::{
    artist_display_name, booking_cost, group_by_artist, group_by_artist_with_diagnostics,
    resolve_daily_rate, resolved_booking_cost, sort_artists_by_cost, ArtistCostGroups,
    ArtistCostSummary,
};
pub use financials::{
    portfolio_financials, portfolio_financials_with_diagnostics, project_booking_costs,
    project_booking_costs_with_diagnostics, project_financials,
    project_financials_with_diagnostics, project_profit, total_project_cost, CostPolicy,
    ExpensePolicy, PortfolioFinancials, ProjectFinancials,
};
