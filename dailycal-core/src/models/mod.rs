mod app_data;
mod food_log;
mod meal_type;
mod profile;
mod water_log;

pub use app_data::AppData;
pub use food_log::FoodLogItem;
pub use meal_type::MealType;
pub use profile::{ActivityLevel, Gender, Goal, ProfileUpdate, UserProfile};
pub use water_log::WaterLog;
