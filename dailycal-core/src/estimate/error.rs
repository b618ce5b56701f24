//! Estimation error types.

use thiserror::Error;

/// Errors from the calorie estimation service. None of them leave a log
/// entry behind; the user can simply resubmit.
#[derive(Error, Debug)]
pub enum EstimateError {
    #[error("Estimator not configured: {0}")]
    NotConfigured(String),

    #[error("No food items to estimate")]
    EmptyRequest,

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("Estimation service returned status {0}")]
    Status(u16),

    #[error("Malformed estimate: {0}")]
    Malformed(String),
}
