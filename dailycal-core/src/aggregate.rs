//! Per-day views over the food and water logs.
//!
//! Food entries are bucketed by [`FoodLogItem::calendar_date`] (UTC), the same
//! derivation used for "today" lookups, so writes and reads always agree.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::energy::daily_calorie_goal;
use crate::models::{AppData, FoodLogItem, WaterLog};

/// Daily water target in glasses.
pub const DEFAULT_WATER_GOAL: u32 = 8;

/// Summed nutrition for a set of food entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MacroTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbohydrates: f64,
    pub fat: f64,
}

impl MacroTotals {
    pub fn add_item(&mut self, item: &FoodLogItem) {
        self.calories += item.total_calories;
        self.protein += item.protein;
        self.carbohydrates += item.carbohydrates;
        self.fat += item.fat;
    }
}

impl fmt::Display for MacroTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Calories: {:.0} | Protein: {:.0}g | Carbs: {:.0}g | Fat: {:.0}g",
            self.calories, self.protein, self.carbohydrates, self.fat
        )
    }
}

pub fn calories_for_date(food_log: &[FoodLogItem], date: NaiveDate) -> f64 {
    food_log
        .iter()
        .filter(|item| item.calendar_date() == date)
        .map(|item| item.total_calories)
        .sum()
}

pub fn glasses_for_date(water_log: &[WaterLog], date: NaiveDate) -> u32 {
    water_log
        .iter()
        .find(|entry| entry.date == date)
        .map(|entry| entry.glasses)
        .unwrap_or(0)
}

/// Buckets entries by calendar date, keeping log order within each day.
pub fn group_by_date(food_log: &[FoodLogItem]) -> BTreeMap<NaiveDate, Vec<FoodLogItem>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<FoodLogItem>> = BTreeMap::new();
    for item in food_log {
        grouped
            .entry(item.calendar_date())
            .or_default()
            .push(item.clone());
    }
    grouped
}

pub fn daily_totals(
    grouped: &BTreeMap<NaiveDate, Vec<FoodLogItem>>,
) -> BTreeMap<NaiveDate, MacroTotals> {
    grouped
        .iter()
        .map(|(date, items)| {
            let mut totals = MacroTotals::default();
            for item in items {
                totals.add_item(item);
            }
            (*date, totals)
        })
        .collect()
}

/// Most recent date first.
pub fn dates_descending<V>(grouped: &BTreeMap<NaiveDate, V>) -> Vec<NaiveDate> {
    grouped.keys().rev().copied().collect()
}

/// One day of the history view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayHistory {
    pub date: NaiveDate,
    pub entries: Vec<FoodLogItem>,
    pub totals: MacroTotals,
}

/// The whole food log grouped by day, most recent day first.
pub fn history(food_log: &[FoodLogItem]) -> Vec<DayHistory> {
    let grouped = group_by_date(food_log);
    let totals = daily_totals(&grouped);

    grouped
        .into_iter()
        .rev()
        .map(|(date, entries)| DayHistory {
            date,
            entries,
            totals: totals.get(&date).copied().unwrap_or_default(),
        })
        .collect()
}

/// Progress toward the calorie and water goals on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub consumed_calories: f64,
    pub calorie_goal: u32,
    /// Capped at 100.
    pub calorie_percent: u32,
    pub glasses: u32,
    pub water_goal: u32,
    /// Capped at 100.
    pub water_percent: u32,
}

impl DailySummary {
    pub fn for_date(data: &AppData, date: NaiveDate, water_goal: u32) -> Self {
        let consumed_calories = calories_for_date(&data.food_log, date);
        let calorie_goal = daily_calorie_goal(data.user.as_ref());
        let glasses = glasses_for_date(&data.water_log, date);

        Self {
            date,
            consumed_calories,
            calorie_goal,
            calorie_percent: capped_percent(consumed_calories, f64::from(calorie_goal)),
            glasses,
            water_goal,
            water_percent: capped_percent(f64::from(glasses), f64::from(water_goal)),
        }
    }
}

fn capped_percent(value: f64, goal: f64) -> u32 {
    if goal <= 0.0 {
        return if value > 0.0 { 100 } else { 0 };
    }
    ((value / goal) * 100.0).round().clamp(0.0, 100.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MealType, UserProfile};
    use chrono::{TimeZone, Utc};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    fn entry(d: u32, hour: u32, meal: MealType, calories: f64) -> FoodLogItem {
        FoodLogItem::new(meal, format!("{} on {}", meal, d))
            .with_date(Utc.with_ymd_and_hms(2025, 4, d, hour, 0, 0).unwrap())
            .with_nutrition(calories, calories / 20.0, calories / 8.0, calories / 40.0)
    }

    /// Newest first, as the store keeps it.
    fn sample_log() -> Vec<FoodLogItem> {
        vec![
            entry(3, 19, MealType::Dinner, 700.0),
            entry(2, 12, MealType::Lunch, 450.0),
            entry(2, 8, MealType::Breakfast, 300.0),
            entry(1, 20, MealType::Snack, 120.0),
        ]
    }

    #[test]
    fn test_calories_for_date_sums_matching_entries() {
        let log = sample_log();
        assert_eq!(calories_for_date(&log, day(2)), 750.0);
        assert_eq!(calories_for_date(&log, day(3)), 700.0);
    }

    #[test]
    fn test_calories_for_date_without_entries_is_zero() {
        assert_eq!(calories_for_date(&sample_log(), day(9)), 0.0);
        assert_eq!(calories_for_date(&[], day(1)), 0.0);
    }

    #[test]
    fn test_glasses_for_date() {
        let water = vec![
            WaterLog::new(day(1)).with_glasses(4),
            WaterLog::new(day(2)).with_glasses(7),
        ];
        assert_eq!(glasses_for_date(&water, day(2)), 7);
        assert_eq!(glasses_for_date(&water, day(5)), 0);
    }

    #[test]
    fn test_group_by_date_keeps_log_order_within_day() {
        let grouped = group_by_date(&sample_log());

        assert_eq!(grouped.len(), 3);
        let meals: Vec<MealType> = grouped[&day(2)].iter().map(|i| i.meal).collect();
        assert_eq!(meals, vec![MealType::Lunch, MealType::Breakfast]);
    }

    #[test]
    fn test_daily_totals_per_date() {
        let totals = daily_totals(&group_by_date(&sample_log()));
        let second = totals[&day(2)];

        assert_eq!(second.calories, 750.0);
        assert_eq!(second.protein, 15.0 + 22.5);
        assert_eq!(second.fat, 7.5 + 11.25);
    }

    #[test]
    fn test_daily_totals_account_for_every_entry() {
        let log = sample_log();
        let totals = daily_totals(&group_by_date(&log));

        let mut from_days = MacroTotals::default();
        for t in totals.values() {
            from_days.calories += t.calories;
            from_days.protein += t.protein;
            from_days.carbohydrates += t.carbohydrates;
            from_days.fat += t.fat;
        }

        let mut direct = MacroTotals::default();
        for item in &log {
            direct.add_item(item);
        }

        assert_eq!(from_days, direct);
    }

    #[test]
    fn test_dates_descending() {
        let grouped = group_by_date(&sample_log());
        assert_eq!(dates_descending(&grouped), vec![day(3), day(2), day(1)]);
    }

    #[test]
    fn test_history_most_recent_first() {
        let days = history(&sample_log());

        assert_eq!(days.len(), 3);
        assert_eq!(days[0].date, day(3));
        assert_eq!(days[1].entries.len(), 2);
        assert_eq!(days[1].totals.calories, 750.0);
        assert_eq!(days[2].totals.calories, 120.0);
    }

    #[test]
    fn test_history_of_empty_log() {
        assert!(history(&[]).is_empty());
    }

    #[test]
    fn test_daily_summary_logged_out_uses_default_goal() {
        let data = AppData {
            user: None,
            food_log: sample_log(),
            water_log: vec![WaterLog::new(day(2)).with_glasses(2)],
        };

        let summary = DailySummary::for_date(&data, day(2), DEFAULT_WATER_GOAL);
        assert_eq!(summary.consumed_calories, 750.0);
        assert_eq!(summary.calorie_goal, 2000);
        assert_eq!(summary.calorie_percent, 38);
        assert_eq!(summary.glasses, 2);
        assert_eq!(summary.water_percent, 25);
    }

    #[test]
    fn test_daily_summary_caps_percentages() {
        let data = AppData {
            user: Some(UserProfile::new("Ada", "ada@example.com")),
            food_log: vec![entry(1, 9, MealType::Lunch, 5000.0)],
            water_log: vec![WaterLog::new(day(1)).with_glasses(12)],
        };

        let summary = DailySummary::for_date(&data, day(1), 8);
        assert_eq!(summary.calorie_goal, 2400);
        assert_eq!(summary.calorie_percent, 100);
        assert_eq!(summary.water_percent, 100);
    }

    #[test]
    fn test_capped_percent_zero_goal() {
        assert_eq!(capped_percent(0.0, 0.0), 0);
        assert_eq!(capped_percent(3.0, 0.0), 100);
    }
}
