pub mod food_cost;
pub mod stores;
