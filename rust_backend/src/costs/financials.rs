//! Project-level cost, budget and profit figures.
//!
//! The dashboard shows "Total Costs" including additional expenses but
//! computes profit from booking costs alone. Which term is included is an
//! explicit [`ExpensePolicy`] rather than baked into either figure.

use serde::{Deserialize, Serialize};

use super::aggregator::resolved_booking_cost;
use crate::error::Diagnostics;
use crate::models::{ArtistDirectory, Project, ProjectId};
use crate::time::count_business_days;

/// Whether a cost figure includes the project's additional expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpensePolicy {
    BookingsOnly,
    IncludeAdditionalExpenses,
}

impl ExpensePolicy {
    fn apply(self, booking_costs: f64, additional_expenses: f64) -> f64 {
        match self {
            ExpensePolicy::BookingsOnly => booking_costs,
            ExpensePolicy::IncludeAdditionalExpenses => booking_costs + additional_expenses,
        }
    }
}

/// Expense policy for each of the two derived figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostPolicy {
    /// Policy for the "Total Costs" figure.
    pub total_costs: ExpensePolicy,
    /// Policy for the costs subtracted from the budget to get profit.
    pub profit: ExpensePolicy,
}

impl Default for CostPolicy {
    fn default() -> Self {
        Self {
            total_costs: ExpensePolicy::IncludeAdditionalExpenses,
            profit: ExpensePolicy::BookingsOnly,
        }
    }
}

impl CostPolicy {
    /// Same policy for both figures.
    pub fn uniform(policy: ExpensePolicy) -> Self {
        Self {
            total_costs: policy,
            profit: policy,
        }
    }
}

/// Sum of resolved booking costs of a project.
pub fn project_booking_costs(project: &Project, artists: &ArtistDirectory) -> f64 {
    project_booking_costs_with_diagnostics(project, artists, &mut Diagnostics::new())
}

pub fn project_booking_costs_with_diagnostics(
    project: &Project,
    artists: &ArtistDirectory,
    diagnostics: &mut Diagnostics,
) -> f64 {
    project
        .bookings
        .iter()
        .map(|b| resolved_booking_cost(b, artists, diagnostics))
        .sum()
}

/// Booking costs plus, under [`ExpensePolicy::IncludeAdditionalExpenses`],
/// the project's additional expenses.
pub fn total_project_cost(
    project: &Project,
    artists: &ArtistDirectory,
    policy: ExpensePolicy,
) -> f64 {
    policy.apply(
        project_booking_costs(project, artists),
        project.additional_expenses_or_zero(),
    )
}

/// `budget - costs`, with costs computed under `policy`.
pub fn project_profit(project: &Project, artists: &ArtistDirectory, policy: ExpensePolicy) -> f64 {
    project.budget_or_zero() - total_project_cost(project, artists, policy)
}

/// Derived financial figures of one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFinancials {
    pub project_id: ProjectId,
    pub project_name: String,
    pub budget: f64,
    pub booking_costs: f64,
    pub additional_expenses: f64,
    pub total_costs: f64,
    pub profit: f64,
    /// Monday-to-Friday days between the project's start and end.
    pub business_days: i64,
    /// Sum of inclusive booking durations (artist-days).
    pub booked_days: i64,
}

impl ProjectFinancials {
    /// Share of the budget consumed by `total_costs`; `None` without a budget.
    pub fn budget_utilization(&self) -> Option<f64> {
        (self.budget > 0.0).then(|| self.total_costs / self.budget)
    }

    pub fn is_over_budget(&self) -> bool {
        self.total_costs > self.budget
    }
}

pub fn project_financials(
    project: &Project,
    artists: &ArtistDirectory,
    policy: &CostPolicy,
) -> ProjectFinancials {
    project_financials_with_diagnostics(project, artists, policy, &mut Diagnostics::new())
}

pub fn project_financials_with_diagnostics(
    project: &Project,
    artists: &ArtistDirectory,
    policy: &CostPolicy,
    diagnostics: &mut Diagnostics,
) -> ProjectFinancials {
    let budget = project.budget_or_zero();
    let booking_costs = project_booking_costs_with_diagnostics(project, artists, diagnostics);
    let additional_expenses = project.additional_expenses_or_zero();

    let business_days = match (project.start_date, project.end_date) {
        (Some(start), Some(end)) => count_business_days(start, end),
        _ => 0,
    };
    let booked_days = project
        .bookings
        .iter()
        .filter_map(|b| b.duration_days())
        .sum();

    ProjectFinancials {
        project_id: project.id.clone(),
        project_name: project.name.clone(),
        budget,
        booking_costs,
        additional_expenses,
        total_costs: policy.total_costs.apply(booking_costs, additional_expenses),
        profit: budget - policy.profit.apply(booking_costs, additional_expenses),
        business_days,
        booked_days,
    }
}

/// Financials of several projects with portfolio totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioFinancials {
    pub projects: Vec<ProjectFinancials>,
    pub total_budget: f64,
    pub total_costs: f64,
    pub total_profit: f64,
}

pub fn portfolio_financials(
    projects: &[Project],
    artists: &ArtistDirectory,
    policy: &CostPolicy,
) -> PortfolioFinancials {
    portfolio_financials_with_diagnostics(projects, artists, policy, &mut Diagnostics::new())
}

pub fn portfolio_financials_with_diagnostics(
    projects: &[Project],
    artists: &ArtistDirectory,
    policy: &CostPolicy,
    diagnostics: &mut Diagnostics,
) -> PortfolioFinancials {
    let projects: Vec<ProjectFinancials> = projects
        .iter()
        .map(|p| project_financials_with_diagnostics(p, artists, policy, diagnostics))
        .collect();

    PortfolioFinancials {
        total_budget: projects.iter().map(|p| p.budget).sum(),
        total_costs: projects.iter().map(|p| p.total_costs).sum(),
        total_profit: projects.iter().map(|p| p.profit).sum(),
        projects,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Artist, Booking};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_project() -> Project {
        // 2024-01-01 (Mon) .. 2024-01-14 (Sun): 10 business days
        Project::new("p1", "Northern Lights", date(2024, 1, 1), date(2024, 1, 14))
            .with_budget(5000.0)
            .with_additional_expenses(400.0)
            .with_booking(Booking::new("b1", "a1", "p1", date(2024, 1, 1), date(2024, 1, 5)))
            .with_booking(
                Booking::new("b2", "a2", "p1", date(2024, 1, 8), date(2024, 1, 9))
                    .with_daily_rate(300.0),
            )
    }

    fn artists() -> ArtistDirectory {
        vec![Artist::new("a1", "Ana", 200.0), Artist::new("a2", "Ben", 999.0)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_total_project_cost_policies() {
        let project = sample_project();
        // 5 * 200 + 2 * 300
        assert_eq!(
            total_project_cost(&project, &artists(), ExpensePolicy::BookingsOnly),
            1600.0
        );
        assert_eq!(
            total_project_cost(&project, &artists(), ExpensePolicy::IncludeAdditionalExpenses),
            2000.0
        );
    }

    #[test]
    fn test_profit_follows_its_own_policy() {
        let project = sample_project();
        assert_eq!(project_profit(&project, &artists(), ExpensePolicy::BookingsOnly), 3400.0);
        assert_eq!(
            project_profit(&project, &artists(), ExpensePolicy::IncludeAdditionalExpenses),
            3000.0
        );
    }

    #[test]
    fn test_financials_default_policy() {
        let financials = project_financials(&sample_project(), &artists(), &CostPolicy::default());

        assert_eq!(financials.booking_costs, 1600.0);
        assert_eq!(financials.additional_expenses, 400.0);
        assert_eq!(financials.total_costs, 2000.0);
        assert_eq!(financials.profit, 3400.0);
        assert_eq!(financials.business_days, 10);
        assert_eq!(financials.booked_days, 7);
        assert_eq!(financials.budget_utilization(), Some(0.4));
        assert!(!financials.is_over_budget());
    }

    #[test]
    fn test_financials_uniform_policy() {
        let policy = CostPolicy::uniform(ExpensePolicy::IncludeAdditionalExpenses);
        let financials = project_financials(&sample_project(), &artists(), &policy);
        assert_eq!(financials.total_costs, 2000.0);
        assert_eq!(financials.profit, 3000.0);
    }

    #[test]
    fn test_financials_without_budget_or_dates() {
        let mut project = sample_project();
        project.budget = None;
        project.end_date = None;

        let financials = project_financials(&project, &artists(), &CostPolicy::default());
        assert_eq!(financials.budget, 0.0);
        assert_eq!(financials.business_days, 0);
        assert_eq!(financials.budget_utilization(), None);
        assert!(financials.is_over_budget());
    }

    #[test]
    fn test_portfolio_totals() {
        let second = Project::new("p2", "Harbour", date(2024, 2, 1), date(2024, 2, 29))
            .with_budget(1000.0)
            .with_booking(Booking::new("b3", "ghost", "p2", date(2024, 2, 1), date(2024, 2, 2)));

        let mut diagnostics = Diagnostics::new();
        let portfolio = portfolio_financials_with_diagnostics(
            &[sample_project(), second],
            &artists(),
            &CostPolicy::default(),
            &mut diagnostics,
        );

        assert_eq!(portfolio.projects.len(), 2);
        assert_eq!(portfolio.total_budget, 6000.0);
        assert_eq!(portfolio.total_costs, 2000.0);
        assert_eq!(portfolio.total_profit, 4400.0);
        assert_eq!(diagnostics.len(), 1);
    }
}
