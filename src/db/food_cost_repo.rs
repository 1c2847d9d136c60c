// src/db/food_cost_repo.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::food_cost::DailyFoodCostRecord};

/// De onde o agregador busca os registros diários.
///
/// Um erro de busca é sempre `Err`, nunca um vetor vazio: "zero linhas" e
/// "falhou" precisam continuar distinguíveis para quem chama.
#[async_trait]
pub trait DailyFoodCostSource: Send + Sync {
    /// Registros do tenant com `start <= date <= end`, em ordem crescente de data.
    /// `store_id` restringe a busca a uma loja.
    async fn fetch_daily_food_costs(
        &self,
        tenant_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        store_id: Option<Uuid>,
    ) -> Result<Vec<DailyFoodCostRecord>, AppError>;
}

// Repositório do food cost diário (tabela `daily_food_costs` + catálogo `stores`)
#[derive(Clone)]
pub struct FoodCostRepository {
    pool: PgPool,
}

impl FoodCostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DailyFoodCostSource for FoodCostRepository {
    async fn fetch_daily_food_costs(
        &self,
        tenant_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
        store_id: Option<Uuid>,
    ) -> Result<Vec<DailyFoodCostRecord>, AppError> {
        // O JOIN traz nome e meta da loja em cada linha; o desempate por
        // store_id deixa a ordem dos grupos estável entre chamadas.
        let records = sqlx::query_as::<_, DailyFoodCostRecord>(
            r#"
            SELECT
                d.store_id,
                d.date,
                d.food_cost_pct,
                d.total_revenue,
                d.total_purchases,
                s.name AS store_name,
                s.target_food_cost_pct
            FROM daily_food_costs d
            JOIN stores s ON s.id = d.store_id AND s.tenant_id = d.tenant_id
            WHERE d.tenant_id = $1
              AND d.date BETWEEN $2 AND $3
              AND ($4::uuid IS NULL OR d.store_id = $4)
            ORDER BY d.date ASC, d.store_id ASC
            "#,
        )
        .bind(tenant_id)
        .bind(start)
        .bind(end)
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(
            %tenant_id,
            %start,
            %end,
            rows = records.len(),
            "Registros de food cost carregados"
        );

        Ok(records)
    }
}
