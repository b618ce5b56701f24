//! Free-text meal parsing.
//!
//! One food per line, written as `quantity, food name`. A line without a
//! comma is a single serving of whatever the line says.

use crate::estimate::FoodItem;

/// Quantity assumed for lines without an explicit one.
pub const DEFAULT_QUANTITY: &str = "1 serving";

pub fn parse_food_items(text: &str) -> Vec<FoodItem> {
    text.lines()
        .map(parse_line)
        .filter(|item| !item.food_name.is_empty())
        .collect()
}

fn parse_line(line: &str) -> FoodItem {
    let line = line.trim();
    match line.split_once(',') {
        Some((quantity, name)) if !name.is_empty() => FoodItem::new(name.trim(), quantity.trim()),
        _ => FoodItem::new(line, DEFAULT_QUANTITY),
    }
}
