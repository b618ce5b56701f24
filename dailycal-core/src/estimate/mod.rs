//! Calorie and macro-nutrient estimation.
//!
//! The estimator is an external collaborator: a meal type and its food items
//! go in, totals and a free-text breakdown come out, or the call fails.
//! [`HttpEstimator`] talks to a language model over HTTP; tests and embedders
//! can supply their own [`Estimator`].

mod client;
mod error;
mod protocol;

use std::future::Future;

pub use client::HttpEstimator;
pub use error::EstimateError;
pub use protocol::{render_prompt, EstimateRequest, EstimateResponse, FoodItem, SYSTEM_PROMPT};

pub trait Estimator {
    fn estimate(
        &self,
        request: &EstimateRequest,
    ) -> impl Future<Output = Result<EstimateResponse, EstimateError>> + Send;
}
