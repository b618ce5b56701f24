use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::meal_type::MealType;

/// One logged meal with its estimated nutrition.
///
/// `date` is when the entry was recorded, not when the meal was eaten.
/// Entries are never edited after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodLogItem {
    pub id: String,
    pub date: DateTime<Utc>,
    pub meal: MealType,
    #[serde(default)]
    pub query: String,
    pub total_calories: f64,
    pub protein: f64,
    pub carbohydrates: f64,
    pub fat: f64,
    #[serde(default)]
    pub details: String,
}

impl FoodLogItem {
    pub fn new(meal: MealType, query: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date: Utc::now(),
            meal,
            query: query.into(),
            total_calories: 0.0,
            protein: 0.0,
            carbohydrates: 0.0,
            fat: 0.0,
            details: String::new(),
        }
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    pub fn with_nutrition(mut self, calories: f64, protein: f64, carbohydrates: f64, fat: f64) -> Self {
        self.total_calories = calories;
        self.protein = protein;
        self.carbohydrates = carbohydrates;
        self.fat = fat;
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    /// Calendar day the entry belongs to (UTC).
    pub fn calendar_date(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

impl fmt::Display for FoodLogItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} - {:.0} kcal", self.meal, self.total_calories)?;
        if !self.query.is_empty() {
            writeln!(f, "  {}", self.query.lines().collect::<Vec<_>>().join(", "))?;
        }
        write!(
            f,
            "  P: {}g | C: {}g | F: {}g",
            self.protein, self.carbohydrates, self.fat
        )?;
        if !self.details.is_empty() {
            write!(f, "\n  {}", self.details)?;
        }
        Ok(())
    }
}
