use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::blob::{BlobError, BlobStore};
use crate::models::{AppData, FoodLogItem, ProfileUpdate, UserProfile, WaterLog};

/// What logging out does to the food and water logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoutPolicy {
    /// Reset everything to the empty state.
    #[default]
    ClearLogs,
    /// Forget the user but keep both logs for the next login.
    RetainLogs,
}

impl fmt::Display for LogoutPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogoutPolicy::ClearLogs => write!(f, "clear_logs"),
            LogoutPolicy::RetainLogs => write!(f, "retain_logs"),
        }
    }
}

impl FromStr for LogoutPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "clear_logs" => Ok(LogoutPolicy::ClearLogs),
            "retain_logs" => Ok(LogoutPolicy::RetainLogs),
            _ => Err(format!(
                "Invalid logout policy '{}'. Valid options: clear_logs, retain_logs",
                s
            )),
        }
    }
}

/// A mutation was rejected, or applied in memory but not persisted.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to save data: {0}")]
    Blob(#[from] BlobError),

    #[error("Failed to encode data: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Invalid food log entry: {0}")]
    InvalidEntry(String),
}

/// Owns the app's data for one session and writes every change through to
/// the blob store.
///
/// Mutations update memory first. If the save then fails, the in-memory state
/// stays authoritative and the error is returned for the caller to report.
pub struct Store<B: BlobStore> {
    blob: B,
    data: AppData,
    logout_policy: LogoutPolicy,
}

impl<B: BlobStore> Store<B> {
    /// Loads the stored document, falling back to empty data if it is
    /// missing, unreadable or unparseable.
    pub fn open(blob: B, logout_policy: LogoutPolicy) -> Self {
        let data = load_app_data(&blob);
        Self {
            blob,
            data,
            logout_policy,
        }
    }

    pub fn data(&self) -> &AppData {
        &self.data
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> AppData {
        self.data.clone()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.data.user.as_ref()
    }

    pub fn blob(&self) -> &B {
        &self.blob
    }

    pub fn logout_policy(&self) -> LogoutPolicy {
        self.logout_policy
    }

    /// Replaces the current user. Logs are kept.
    pub fn login(&mut self, profile: UserProfile) -> Result<(), StoreError> {
        tracing::info!(name = %profile.name, "logging in");
        self.data.user = Some(profile);
        self.persist()
    }

    pub fn logout(&mut self) -> Result<(), StoreError> {
        tracing::info!(policy = %self.logout_policy, "logging out");
        match self.logout_policy {
            LogoutPolicy::ClearLogs => self.data = AppData::new(),
            LogoutPolicy::RetainLogs => self.data.user = None,
        }
        self.persist()
    }

    /// Merges `update` into the current user.
    ///
    /// Returns `Ok(false)` without touching the blob store when nobody is
    /// logged in.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<bool, StoreError> {
        let Some(user) = self.data.user.as_mut() else {
            tracing::debug!("profile update ignored: no user");
            return Ok(false);
        };
        user.apply(update);
        self.persist()?;
        Ok(true)
    }

    /// Prepends `item`, so the log stays newest first.
    ///
    /// Entries with negative or non-finite numbers are rejected before
    /// anything changes.
    pub fn add_food_log(&mut self, item: FoodLogItem) -> Result<(), StoreError> {
        check_nutrition(&item)?;
        self.data.food_log.insert(0, item);
        self.persist()
    }

    /// Adds one glass to `date`, creating the day's entry if needed.
    pub fn add_water(&mut self, date: NaiveDate) -> Result<(), StoreError> {
        match self.data.water_log.iter_mut().find(|entry| entry.date == date) {
            Some(entry) => entry.glasses += 1,
            None => self.data.water_log.push(WaterLog::new(date).with_glasses(1)),
        }
        self.persist()
    }

    fn persist(&self) -> Result<(), StoreError> {
        let result = self
            .data
            .to_json()
            .map_err(StoreError::from)
            .and_then(|json| self.blob.save(&json).map_err(StoreError::from));

        match &result {
            Ok(()) => tracing::debug!(
                food_entries = self.data.food_log.len(),
                water_entries = self.data.water_log.len(),
                "saved data"
            ),
            Err(e) => tracing::warn!("{}; changes are kept for this session only", e),
        }
        result
    }
}

fn check_nutrition(item: &FoodLogItem) -> Result<(), StoreError> {
    let fields = [
        ("totalCalories", item.total_calories),
        ("protein", item.protein),
        ("carbohydrates", item.carbohydrates),
        ("fat", item.fat),
    ];
    for (name, value) in fields {
        if !value.is_finite() || value < 0.0 {
            return Err(StoreError::InvalidEntry(format!(
                "{} must be a non-negative number, got {}",
                name, value
            )));
        }
    }
    Ok(())
}

fn load_app_data<B: BlobStore>(blob: &B) -> AppData {
    match blob.load() {
        Ok(Some(json)) => match AppData::from_json(&json) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!("Failed to parse stored data, starting empty: {}", e);
                AppData::new()
            }
        },
        Ok(None) => AppData::new(),
        Err(e) => {
            tracing::warn!("Failed to read stored data, starting empty: {}", e);
            AppData::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Goal, MealType};
    use crate::store::{FileBlobStore, MemoryBlobStore};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, d).unwrap()
    }

    fn meal(query: &str, calories: f64) -> FoodLogItem {
        FoodLogItem::new(MealType::Lunch, query)
            .with_date(Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap())
            .with_nutrition(calories, 10.0, 20.0, 5.0)
    }

    fn open_memory() -> Store<MemoryBlobStore> {
        Store::open(MemoryBlobStore::new(), LogoutPolicy::ClearLogs)
    }

    fn stored(store: &Store<MemoryBlobStore>) -> AppData {
        AppData::from_json(&store.blob().document().unwrap()).unwrap()
    }

    #[test]
    fn test_open_empty_blob_starts_empty() {
        let store = open_memory();
        assert!(store.data().is_empty());
        assert_eq!(store.blob().save_count(), 0);
    }

    #[test]
    fn test_open_unparseable_blob_starts_empty() {
        let store = Store::open(
            MemoryBlobStore::with_document("{definitely not json"),
            LogoutPolicy::ClearLogs,
        );
        assert!(store.data().is_empty());
    }

    #[test]
    fn test_login_keeps_logs() {
        let mut store = open_memory();
        store.add_food_log(meal("soup", 200.0)).unwrap();

        store.login(UserProfile::new("Ada", "ada@example.com")).unwrap();

        assert_eq!(store.user().unwrap().name, "Ada");
        assert_eq!(store.data().food_log.len(), 1);
        assert_eq!(stored(&store), *store.data());
    }

    #[test]
    fn test_add_food_log_is_newest_first() {
        let mut store = open_memory();
        let a = meal("a", 100.0);
        let b = meal("b", 200.0);

        store.add_food_log(a.clone()).unwrap();
        store.add_food_log(b.clone()).unwrap();

        assert_eq!(store.data().food_log, vec![b, a]);
        assert_eq!(store.blob().save_count(), 2);
    }

    #[test]
    fn test_add_food_log_rejects_non_finite_numbers() {
        let mut store = open_memory();
        store.add_food_log(meal("ok", 100.0)).unwrap();

        let err = store.add_food_log(meal("nan", f64::NAN)).unwrap_err();
        assert!(matches!(err, StoreError::InvalidEntry(_)));
        assert!(store
            .add_food_log(meal("negative", -1.0))
            .is_err());
        assert!(store
            .add_food_log(meal("inf", f64::INFINITY))
            .is_err());

        assert_eq!(store.data().food_log.len(), 1);
        assert_eq!(store.blob().save_count(), 1);

        let reopened = Store::open(
            MemoryBlobStore::with_document(store.blob().document().unwrap()),
            LogoutPolicy::ClearLogs,
        );
        assert_eq!(reopened.data().food_log.len(), 1);
    }

    #[test]
    fn test_add_water_twice_same_day_increments() {
        let mut store = open_memory();

        store.add_water(day(1)).unwrap();
        store.add_water(day(1)).unwrap();

        assert_eq!(store.data().water_log, vec![WaterLog::new(day(1)).with_glasses(2)]);
    }

    #[test]
    fn test_add_water_new_day_appends() {
        let mut store = open_memory();

        store.add_water(day(1)).unwrap();
        store.add_water(day(2)).unwrap();
        store.add_water(day(1)).unwrap();

        let water = &store.data().water_log;
        assert_eq!(water.len(), 2);
        assert_eq!(water[0], WaterLog::new(day(1)).with_glasses(2));
        assert_eq!(water[1], WaterLog::new(day(2)).with_glasses(1));
    }

    #[test]
    fn test_update_profile_merges_fields() {
        let mut store = open_memory();
        store.login(UserProfile::new("Ada", "ada@example.com")).unwrap();

        let applied = store
            .update_profile(ProfileUpdate {
                age: Some(36),
                gender: Some(Gender::Female),
                goal: Some(Goal::Lose),
                ..Default::default()
            })
            .unwrap();

        assert!(applied);
        let user = store.user().unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.age, Some(36));
        assert!(user.is_onboarded());
        assert_eq!(stored(&store).user.unwrap().goal, Some(Goal::Lose));
    }

    #[test]
    fn test_update_profile_without_user_is_noop() {
        let mut store = open_memory();

        let applied = store
            .update_profile(ProfileUpdate {
                age: Some(30),
                ..Default::default()
            })
            .unwrap();

        assert!(!applied);
        assert!(store.user().is_none());
        assert_eq!(store.blob().save_count(), 0);
    }

    #[test]
    fn test_logout_clear_logs_resets_everything() {
        let mut store = open_memory();
        store.login(UserProfile::new("Ada", "ada@example.com")).unwrap();
        store.add_food_log(meal("toast", 150.0)).unwrap();
        store.add_water(day(3)).unwrap();

        store.logout().unwrap();

        assert!(store.data().is_empty());
        assert!(stored(&store).is_empty());
    }

    #[test]
    fn test_logout_retain_logs_keeps_entries() {
        let mut store = Store::open(MemoryBlobStore::new(), LogoutPolicy::RetainLogs);
        store.login(UserProfile::new("Ada", "ada@example.com")).unwrap();
        store.add_food_log(meal("toast", 150.0)).unwrap();
        store.add_water(day(3)).unwrap();

        store.logout().unwrap();

        assert!(store.user().is_none());
        assert_eq!(store.data().food_log.len(), 1);
        assert_eq!(store.data().water_log.len(), 1);
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let mut store = open_memory();
        store.add_water(day(1)).unwrap();
        store.blob().set_fail_writes(true);

        let result = store.add_water(day(1));

        assert!(matches!(result, Err(StoreError::Blob(_))));
        assert_eq!(store.data().water_log[0].glasses, 2);
        assert_eq!(stored(&store).water_log[0].glasses, 1);
    }

    #[test]
    fn test_reopen_restores_saved_state() {
        let temp_dir = TempDir::new().unwrap();
        let blob = FileBlobStore::new(temp_dir.path().to_path_buf());

        let mut store = Store::open(blob.clone(), LogoutPolicy::ClearLogs);
        store
            .login(UserProfile::new("Ada", "ada@example.com").with_age(36))
            .unwrap();
        store.add_food_log(meal("salad", 320.5)).unwrap();
        store.add_water(day(4)).unwrap();
        let before = store.snapshot();

        let reopened = Store::open(blob, LogoutPolicy::ClearLogs);
        assert_eq!(*reopened.data(), before);
    }

    #[test]
    fn test_logout_policy_from_str() {
        assert_eq!(
            LogoutPolicy::from_str("retain-logs").unwrap(),
            LogoutPolicy::RetainLogs
        );
        assert_eq!(LogoutPolicy::default(), LogoutPolicy::ClearLogs);
        assert!(LogoutPolicy::from_str("keep").is_err());
    }
}
