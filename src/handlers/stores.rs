// src/handlers/stores.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{i18n::Locale, tenancy::TenantContext},
    models::store::{Store, UpdateStoreTargetPayload},
};

// GET /api/stores
#[utoipa::path(
    get,
    path = "/api/stores",
    tag = "Stores",
    responses(
        (status = 200, description = "Lojas do tenant com suas metas", body = Vec<Store>),
        (status = 400, description = "Tenant ausente")
    ),
    params(
        ("x-tenant-id" = Uuid, Header, description = "ID do tenant")
    )
)]
pub async fn list_stores(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
) -> Result<impl IntoResponse, ApiError> {
    let stores = app_state
        .store_service
        .list_stores(tenant.0)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(stores)))
}

// PUT /api/stores/{id}/target
#[utoipa::path(
    put,
    path = "/api/stores/{id}/target",
    tag = "Stores",
    request_body = UpdateStoreTargetPayload,
    responses(
        (status = 200, description = "Meta atualizada", body = Store),
        (status = 400, description = "Meta fora de 0..100 ou tenant ausente"),
        (status = 404, description = "Loja não encontrada")
    ),
    params(
        ("id" = Uuid, Path, description = "ID da loja"),
        ("x-tenant-id" = Uuid, Header, description = "ID do tenant")
    )
)]
pub async fn update_store_target(
    State(app_state): State<AppState>,
    locale: Locale,
    tenant: TenantContext,
    Path(store_id): Path<Uuid>,
    Json(payload): Json<UpdateStoreTargetPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let store = app_state
        .store_service
        .update_target(tenant.0, store_id, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(store)))
}
