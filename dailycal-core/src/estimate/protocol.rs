//! Request and response types for calorie estimation.
//!
//! Field names use camelCase to match the estimation service's JSON.

use serde::{Deserialize, Serialize};

use super::error::EstimateError;
use crate::models::MealType;

/// One parsed line of a meal description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub food_name: String,
    /// Free text, e.g. "1 cup" or "2 slices".
    pub quantity: String,
}

impl FoodItem {
    pub fn new(food_name: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            food_name: food_name.into(),
            quantity: quantity.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    pub meal: MealType,
    pub food_items: Vec<FoodItem>,
}

impl EstimateRequest {
    pub fn new(meal: MealType, food_items: Vec<FoodItem>) -> Self {
        Self { meal, food_items }
    }
}

/// Estimated nutrition for a whole meal. Grams for the macros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResponse {
    pub total_calories: f64,
    pub protein: f64,
    pub carbohydrates: f64,
    pub fat: f64,
    pub details: String,
}

impl EstimateResponse {
    /// Rejects negative or non-finite numbers.
    pub fn validate(&self) -> Result<(), EstimateError> {
        let fields = [
            ("totalCalories", self.total_calories),
            ("protein", self.protein),
            ("carbohydrates", self.carbohydrates),
            ("fat", self.fat),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(EstimateError::Malformed(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

pub const SYSTEM_PROMPT: &str = "You are a nutritional expert. You answer only with a JSON object.";

/// Builds the instruction text sent to the language model.
pub fn render_prompt(request: &EstimateRequest) -> String {
    let mut prompt = String::from(
        "Analyze the following food log entry and calculate the total calories, \
         protein, carbohydrates, and fat.\n\n",
    );
    prompt.push_str(&format!("Meal: {}\nFood Items:\n", request.meal));
    for item in &request.food_items {
        prompt.push_str(&format!("  - {} ({})\n", item.food_name, item.quantity));
    }
    prompt.push_str(
        "\nProvide a detailed breakdown of each food item and its nutritional information, \
         along with the total calorie and macro-nutrient counts. Make sure the food names \
         are included in the details output.\n\n\
         Format the output as JSON with the keys totalCalories, protein, carbohydrates, fat \
         and details. Do not include units in the numerical values. The numerical values \
         must be numbers and NOT strings. details must be a single string.\n",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> EstimateRequest {
        EstimateRequest::new(
            MealType::Breakfast,
            vec![
                FoodItem::new("oatmeal", "1 cup"),
                FoodItem::new("banana", "1 serving"),
            ],
        )
    }

    #[test]
    fn test_request_wire_format() {
        let json = serde_json::to_value(request()).unwrap();
        assert_eq!(json["meal"], "breakfast");
        assert_eq!(json["foodItems"][0]["foodName"], "oatmeal");
        assert_eq!(json["foodItems"][1]["quantity"], "1 serving");
    }

    #[test]
    fn test_render_prompt_lists_items() {
        let prompt = render_prompt(&request());
        assert!(prompt.contains("Meal: breakfast"));
        assert!(prompt.contains("  - oatmeal (1 cup)\n"));
        assert!(prompt.contains("  - banana (1 serving)\n"));
        assert!(prompt.contains("totalCalories"));
    }

    #[test]
    fn test_response_parses_service_json() {
        let json = r#"{"totalCalories":410,"protein":11.5,"carbohydrates":72,"fat":7,"details":"Oatmeal: 300 kcal. Banana: 110 kcal."}"#;
        let response: EstimateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.total_calories, 410.0);
        assert!(response.validate().is_ok());
    }

    #[test]
    fn test_response_with_string_numbers_is_rejected() {
        let json = r#"{"totalCalories":"410","protein":11,"carbohydrates":72,"fat":7,"details":""}"#;
        assert!(serde_json::from_str::<EstimateResponse>(json).is_err());
    }

    #[test]
    fn test_validate_rejects_negative_values() {
        let response = EstimateResponse {
            total_calories: 200.0,
            protein: -1.0,
            carbohydrates: 10.0,
            fat: 3.0,
            details: String::new(),
        };
        let err = response.validate().unwrap_err();
        assert!(err.to_string().contains("protein"));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let response = EstimateResponse {
            total_calories: f64::NAN,
            protein: 1.0,
            carbohydrates: 10.0,
            fat: 3.0,
            details: String::new(),
        };
        assert!(response.validate().is_err());
    }
}
