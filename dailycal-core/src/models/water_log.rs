use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Glasses of water drunk on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterLog {
    pub date: NaiveDate,
    pub glasses: u32,
}

impl WaterLog {
    pub fn new(date: NaiveDate) -> Self {
        Self { date, glasses: 0 }
    }

    pub fn with_glasses(mut self, glasses: u32) -> Self {
        self.glasses = glasses;
        self
    }
}
