// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Food Cost ---
        handlers::food_cost::get_store_performance,
        handlers::food_cost::get_daily_series,

        // --- Stores ---
        handlers::stores::list_stores,
        handlers::stores::update_store_target,
    ),
    components(
        schemas(
            // --- Food Cost ---
            models::food_cost::DailyFoodCostRecord,
            models::food_cost::Trending,
            models::food_cost::StorePerformanceSummary,

            // --- Stores ---
            models::store::Store,
            models::store::UpdateStoreTargetPayload,
        )
    ),
    tags(
        (name = "Food Cost", description = "Indicadores de food cost por loja"),
        (name = "Stores", description = "Catálogo de lojas e metas")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/food-cost/store-performance",
            "/api/food-cost/daily",
            "/api/stores",
            "/api/stores/{id}/target",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "faltando {expected}");
        }
    }
}
