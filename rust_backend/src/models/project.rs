use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::booking::{Booking, ProjectId};
use super::serde_helpers::{lenient_date, lenient_number, lenient_string};

/// A named delivery milestone of a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
}

impl Delivery {
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            date: Some(date),
        }
    }
}

/// A project owning its bookings and deliveries.
///
/// `start_date` is the origin of the project's timeline grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub budget: Option<f64>,
    /// Externally entered expenses on top of artist bookings.
    #[serde(default, deserialize_with = "lenient_number")]
    pub additional_expenses: Option<f64>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub deliveries: Vec<Delivery>,
}

impl Project {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            id: ProjectId::new(id),
            name: name.into(),
            start_date: Some(start),
            end_date: Some(end),
            ..Default::default()
        }
    }

    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn with_additional_expenses(mut self, expenses: f64) -> Self {
        self.additional_expenses = Some(expenses);
        self
    }

    pub fn with_booking(mut self, booking: Booking) -> Self {
        self.bookings.push(booking);
        self
    }

    pub fn with_delivery(mut self, delivery: Delivery) -> Self {
        self.deliveries.push(delivery);
        self
    }

    /// Budget, treating absent or non-finite values as zero.
    pub fn budget_or_zero(&self) -> f64 {
        self.budget.filter(|b| b.is_finite()).unwrap_or(0.0)
    }

    pub fn additional_expenses_or_zero(&self) -> f64 {
        self.additional_expenses
            .filter(|e| e.is_finite())
            .unwrap_or(0.0)
    }

    /// Deliveries with a valid date, sorted by date.
    pub fn scheduled_deliveries(&self) -> Vec<&Delivery> {
        let mut deliveries: Vec<&Delivery> =
            self.deliveries.iter().filter(|d| d.date.is_some()).collect();
        deliveries.sort_by_key(|d| d.date);
        deliveries
    }

    /// First delivery dated on or after `today`.
    pub fn next_delivery(&self, today: NaiveDate) -> Option<&Delivery> {
        self.scheduled_deliveries()
            .into_iter()
            .find(|d| d.date.is_some_and(|date| date >= today))
    }
}
