// src/models/store.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(ignore)]
    pub tenant_id: Uuid,

    #[schema(example = "Sucursal Centro")]
    pub name: String,

    #[schema(value_type = Option<f64>, example = 28.5)]
    pub target_food_cost_pct: Option<Decimal>,

    pub created_at: DateTime<Utc>,
}

fn validate_target_pct(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO || *value > Decimal::ONE_HUNDRED {
        let mut err = ValidationError::new("range");
        err.message = Some("A meta deve estar entre 0 e 100.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStoreTargetPayload {
    /// `null` volta a loja para a meta padrão (28.5)
    #[validate(custom(function = "validate_target_pct"))]
    #[schema(value_type = Option<f64>, example = 27.0)]
    pub target_food_cost_pct: Option<Decimal>,
}
