//! Meal logging: describe a meal, get an estimate, confirm it into the log.
//!
//! Nothing is written until the user confirms the estimate. A failed
//! estimate leaves no trace and can simply be resubmitted.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

use crate::estimate::{EstimateError, EstimateRequest, EstimateResponse, Estimator};
use crate::models::{FoodLogItem, MealType};
use crate::parse::parse_food_items;
use crate::validate::{validate_meal_text, ValidationError};

#[derive(Error, Debug)]
pub enum LogMealError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("No food items found in the description")]
    NoItems,

    #[error("An estimate is already in progress")]
    Busy,

    #[error("We couldn't calculate the calories for your entry: {0}")]
    Estimate(#[from] EstimateError),
}

/// An estimate waiting for the user to accept it.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMeal {
    pub meal: MealType,
    /// The description exactly as entered.
    pub query: String,
    pub estimate: EstimateResponse,
}

impl PendingMeal {
    /// Turns the estimate into a log entry recorded at `now`.
    pub fn confirm(self, now: DateTime<Utc>) -> FoodLogItem {
        FoodLogItem::new(self.meal, self.query)
            .with_date(now)
            .with_nutrition(
                self.estimate.total_calories,
                self.estimate.protein,
                self.estimate.carbohydrates,
                self.estimate.fat,
            )
            .with_details(self.estimate.details)
    }
}

/// Runs meal descriptions through an estimator, one at a time.
pub struct MealLogger<E: Estimator> {
    estimator: E,
    in_flight: AtomicBool,
}

struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<E: Estimator> MealLogger<E> {
    pub fn new(estimator: E) -> Self {
        Self {
            estimator,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    /// True while an estimate is outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Validates and parses `text`, then asks the estimator.
    ///
    /// A second call while one is still outstanding fails with
    /// [`LogMealError::Busy`].
    pub async fn estimate(&self, meal: MealType, text: &str) -> Result<PendingMeal, LogMealError> {
        validate_meal_text(text)?;
        let items = parse_food_items(text);
        if items.is_empty() {
            return Err(LogMealError::NoItems);
        }

        let _guard = InFlight::acquire(&self.in_flight).ok_or(LogMealError::Busy)?;

        let request = EstimateRequest::new(meal, items);
        let estimate = match self.estimator.estimate(&request).await {
            Ok(estimate) => estimate,
            Err(e) => {
                tracing::warn!(%meal, "estimate failed: {}", e);
                return Err(e.into());
            }
        };
        estimate.validate()?;

        Ok(PendingMeal {
            meal,
            query: text.to_string(),
            estimate,
        })
    }
}
