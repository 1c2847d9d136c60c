// src/db/store_repo.rs

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::store::Store};

/// Catálogo de lojas do tenant.
#[async_trait]
pub trait StoreCatalog: Send + Sync {
    async fn list_stores(&self, tenant_id: Uuid) -> Result<Vec<Store>, AppError>;

    /// Lojas de outro tenant são tratadas como inexistentes (`StoreNotFound`).
    async fn update_target(
        &self,
        tenant_id: Uuid,
        store_id: Uuid,
        target_food_cost_pct: Option<Decimal>,
    ) -> Result<Store, AppError>;
}

// Implementação Postgres do catálogo
#[derive(Clone)]
pub struct StoreRepository {
    pool: PgPool,
}

impl StoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoreCatalog for StoreRepository {
    async fn list_stores(&self, tenant_id: Uuid) -> Result<Vec<Store>, AppError> {
        let stores = sqlx::query_as::<_, Store>(
            r#"
            SELECT id, tenant_id, name, target_food_cost_pct, created_at
            FROM stores
            WHERE tenant_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(tenant_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(stores)
    }

    async fn update_target(
        &self,
        tenant_id: Uuid,
        store_id: Uuid,
        target_food_cost_pct: Option<Decimal>,
    ) -> Result<Store, AppError> {
        sqlx::query_as::<_, Store>(
            r#"
            UPDATE stores
            SET target_food_cost_pct = $3
            WHERE id = $2 AND tenant_id = $1
            RETURNING id, tenant_id, name, target_food_cost_pct, created_at
            "#,
        )
        .bind(tenant_id)
        .bind(store_id)
        .bind(target_food_cost_pct)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::StoreNotFound)
    }
}
