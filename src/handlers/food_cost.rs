// src/handlers/food_cost.rs

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid; // Usado nos params do Swagger
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, tenancy::TenantContext},
    models::food_cost::{
        DailyFoodCostRecord, DailySeriesQuery, StorePerformanceQuery, StorePerformanceSummary,
    },
};

// GET /api/food-cost/store-performance
#[utoipa::path(
    get,
    path = "/api/food-cost/store-performance",
    tag = "Food Cost",
    responses(
        (status = 200, description = "Performance por loja, da pior para a melhor", body = Vec<StorePerformanceSummary>),
        (status = 400, description = "Tenant ausente ou janela inválida"),
        (status = 500, description = "Falha ao buscar os registros")
    ),
    params(
        StorePerformanceQuery,
        ("x-tenant-id" = Uuid, Header, description = "ID do tenant")
    )
)]
pub async fn get_store_performance(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: Option<TenantContext>,
    query: Result<Query<StorePerformanceQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) =
        query.map_err(|e| AppError::from(e).to_api_error(&locale, &app_state.i18n_store))?;

    query
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let summaries = app_state
        .store_performance_service
        .get_store_performance(tenant.map(|t| t.0), query.days)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(summaries)))
}

// GET /api/food-cost/daily
#[utoipa::path(
    get,
    path = "/api/food-cost/daily",
    tag = "Food Cost",
    responses(
        (status = 200, description = "Food cost diário da janela (gráfico)", body = Vec<DailyFoodCostRecord>),
        (status = 400, description = "Tenant ausente ou janela inválida")
    ),
    params(
        DailySeriesQuery,
        ("x-tenant-id" = Uuid, Header, description = "ID do tenant")
    )
)]
pub async fn get_daily_series(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: Option<TenantContext>,
    query: Result<Query<DailySeriesQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) =
        query.map_err(|e| AppError::from(e).to_api_error(&locale, &app_state.i18n_store))?;

    query
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let series = app_state
        .store_performance_service
        .daily_series(tenant.map(|t| t.0), query.days, query.store_id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(series)))
}
