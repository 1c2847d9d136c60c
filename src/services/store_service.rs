// src/services/store_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::StoreCatalog,
    models::store::{Store, UpdateStoreTargetPayload},
    services::performance_cache::StorePerformanceCache,
};

#[derive(Clone)]
pub struct StoreService {
    catalog: Arc<dyn StoreCatalog>,
    cache: Arc<StorePerformanceCache>,
}

impl StoreService {
    pub fn new(catalog: Arc<dyn StoreCatalog>, cache: Arc<StorePerformanceCache>) -> Self {
        Self { catalog, cache }
    }

    pub async fn list_stores(&self, tenant_id: Uuid) -> Result<Vec<Store>, AppError> {
        self.catalog.list_stores(tenant_id).await
    }

    pub async fn update_target(
        &self,
        tenant_id: Uuid,
        store_id: Uuid,
        payload: UpdateStoreTargetPayload,
    ) -> Result<Store, AppError> {
        let store = self
            .catalog
            .update_target(tenant_id, store_id, payload.target_food_cost_pct)
            .await?;

        // Os resumos em cache ainda carregam a meta antiga
        let dropped = self.cache.invalidate_tenant(tenant_id).await;

        tracing::info!(
            "🎯 Meta da loja {} atualizada para {:?} ({} janelas descartadas do cache)",
            store.id,
            store.target_food_cost_pct,
            dropped
        );

        Ok(store)
    }
}
