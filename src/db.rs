pub mod food_cost_repo;
pub use food_cost_repo::{DailyFoodCostSource, FoodCostRepository};
pub mod store_repo;
pub use store_repo::{StoreCatalog, StoreRepository};
