use serde::{Deserialize, Serialize};

use super::food_log::FoodLogItem;
use super::profile::UserProfile;
use super::water_log::WaterLog;

/// Everything the app persists, stored as a single document.
///
/// `user` is `None` while logged out. `food_log` is newest first by
/// insertion; `water_log` holds at most one entry per date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    pub user: Option<UserProfile>,
    #[serde(default)]
    pub food_log: Vec<FoodLogItem>,
    #[serde(default)]
    pub water_log: Vec<WaterLog>,
}

impl AppData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.user.is_none() && self.food_log.is_empty() && self.water_log.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
