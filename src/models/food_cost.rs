// src/models/food_cost.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Janela padrão (em dias) quando o cliente não informa `days`.
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

/// Maior janela aceita (~10 anos). Acima disso a data inicial sai do intervalo do Postgres.
pub const MAX_WINDOW_DAYS: u32 = 3650;

fn default_window_days() -> u32 {
    DEFAULT_WINDOW_DAYS
}

// --- Entrada: uma linha por loja por dia ---

/// Registro diário de food cost de uma loja, já com o nome e a meta da loja
/// (desnormalizados do catálogo pelo JOIN do repositório).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyFoodCostRecord {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub store_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2025-03-14")]
    pub date: NaiveDate,

    // Pode vir nulo quando a loja não subiu compras/vendas do dia
    #[schema(value_type = Option<f64>, example = 29.4)]
    pub food_cost_pct: Option<Decimal>,

    #[schema(value_type = f64, example = 15230.50)]
    pub total_revenue: Decimal,

    #[schema(value_type = f64, example = 4480.10)]
    pub total_purchases: Decimal,

    #[schema(example = "Sucursal Centro")]
    pub store_name: String,

    #[schema(value_type = Option<f64>, example = 28.5)]
    pub target_food_cost_pct: Option<Decimal>,
}

// --- Saída: resumo por loja ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Trending {
    Up,     // Piorando (food cost subindo)
    Down,   // Melhorando
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StorePerformanceSummary {
    pub store_id: Uuid,

    #[schema(example = "Sucursal Centro")]
    pub store_name: String,

    #[schema(value_type = f64, example = 31.0)]
    pub avg_food_cost: Decimal,

    #[schema(value_type = f64, example = 28.5)]
    pub target: Decimal,

    // Positivo = acima da meta (pior)
    #[schema(value_type = f64, example = 2.5)]
    pub delta: Decimal,

    pub trending: Trending,

    #[schema(example = 152305)]
    pub total_ventas: i64,

    #[schema(example = 44801)]
    pub total_compras: i64,
}

// --- Query params ---

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StorePerformanceQuery {
    /// Tamanho da janela retroativa em dias (padrão 30)
    #[serde(default = "default_window_days")]
    #[validate(range(min = 1, max = 3650, message = "A janela deve ter entre 1 e 3650 dias."))]
    #[param(example = 30, minimum = 1, maximum = 3650)]
    pub days: u32,
}

#[derive(Debug, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DailySeriesQuery {
    #[serde(default = "default_window_days")]
    #[validate(range(min = 1, max = 3650, message = "A janela deve ter entre 1 e 3650 dias."))]
    #[param(example = 30, minimum = 1, maximum = 3650)]
    pub days: u32,

    /// Restringe a série a uma loja
    pub store_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_must_fit_between_one_day_and_the_maximum() {
        assert!(StorePerformanceQuery { days: 1 }.validate().is_ok());
        assert!(StorePerformanceQuery { days: MAX_WINDOW_DAYS }.validate().is_ok());
        assert!(StorePerformanceQuery { days: 0 }.validate().is_err());
        assert!(StorePerformanceQuery { days: MAX_WINDOW_DAYS + 1 }.validate().is_err());
        assert!(StorePerformanceQuery { days: u32::MAX }.validate().is_err());
    }

    #[test]
    fn daily_series_window_has_the_same_bounds() {
        let query = DailySeriesQuery { days: 3_000_000, store_id: None };
        let errors = query.validate().unwrap_err();

        assert!(errors.field_errors().contains_key("days"));
        assert!(DailySeriesQuery { days: MAX_WINDOW_DAYS, store_id: None }.validate().is_ok());
    }
}
