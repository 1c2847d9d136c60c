// src/middleware/tenancy.rs

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts, OptionalFromRequestParts},
    http::request::Parts,
};
use uuid::Uuid;

use crate::{
    common::{
        error::{ApiError, AppError},
        i18n::I18nStore,
    },
    middleware::i18n::Locale,
};

// O nome do nosso cabeçalho HTTP customizado
const TENANT_ID_HEADER: &str = "x-tenant-id";

// O tenant (empresa) que o cliente quer acessar. É o único ponto que lê o
// contexto da requisição; os serviços recebem o tenant como parâmetro.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantContext(pub Uuid);

fn read_tenant_header(parts: &Parts) -> Result<Option<TenantContext>, AppError> {
    let Some(value) = parts.headers.get(TENANT_ID_HEADER) else {
        return Ok(None);
    };

    let value_str = value.to_str().map_err(|_| AppError::InvalidTenantHeader)?;
    let tenant_id = Uuid::parse_str(value_str).map_err(|_| AppError::InvalidTenantHeader)?;

    Ok(Some(TenantContext(tenant_id)))
}

fn reject<S>(err: AppError, parts: &Parts, state: &S) -> ApiError
where
    Arc<I18nStore>: FromRef<S>,
{
    let i18n = Arc::<I18nStore>::from_ref(state);
    err.to_api_error(&Locale::from_headers(&parts.headers), &i18n)
}

// Cabeçalho obrigatório: ausente vira `NoTenant`
impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
    Arc<I18nStore>: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        read_tenant_header(parts)
            .and_then(|tenant| tenant.ok_or(AppError::NoTenant))
            .map_err(|err| reject(err, parts, state))
    }
}

// `Option<TenantContext>`: ausente vira `None` e o serviço decide; malformado ainda é rejeitado.
impl<S> OptionalFromRequestParts<S> for TenantContext
where
    S: Send + Sync,
    Arc<I18nStore>: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        read_tenant_header(parts).map_err(|err| reject(err, parts, state))
    }
}
