// src/common/error.rs

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// Erros de domínio. Os handlers convertem para `ApiError` (já traduzido)
// através de `to_api_error`.
#[derive(Debug, Error)]
pub enum AppError {
    // Nenhum tenant pôde ser resolvido antes da consulta. Não tentar de novo
    // sem restabelecer o contexto da loja.
    #[error("Tenant não informado")]
    NoTenant,

    #[error("Cabeçalho X-Tenant-ID inválido")]
    InvalidTenantHeader,

    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Query string que nem chegou a ser desserializada (ex.: `days=abc`)
    #[error("Query string inválida: {0}")]
    InvalidQuery(#[from] QueryRejection),

    #[error("Loja não encontrada")]
    StoreNotFound,

    // Falha na busca dos dados (transporte, permissão ou query).
    // Sobe sem alteração até o handler.
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::NoTenant
            | AppError::InvalidTenantHeader
            | AppError::ValidationError(_)
            | AppError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            AppError::StoreNotFound => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message_key(&self) -> &'static str {
        match self {
            AppError::NoTenant => "error.no_tenant",
            AppError::InvalidTenantHeader => "error.invalid_tenant_header",
            AppError::ValidationError(_) | AppError::InvalidQuery(_) => "error.validation",
            AppError::StoreNotFound => "error.store_not_found",
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => "error.internal",
        }
    }

    /// Converte o erro de domínio na resposta HTTP traduzida para o idioma do cliente.
    pub fn to_api_error(&self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let status = self.status();

        // Os detalhes internos ficam só no log
        if status.is_server_error() {
            tracing::error!("🔥 Erro Interno do Servidor: {}", self);
        }

        let details = match self {
            AppError::ValidationError(errors) => {
                let mut details = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<Value> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| Value::String(m.to_string())))
                        .collect();
                    details.insert(field.to_string(), Value::Array(messages));
                }
                Some(Value::Object(details))
            }
            AppError::InvalidQuery(rejection) => Some(json!({ "query": [rejection.body_text()] })),
            _ => None,
        };

        ApiError {
            status,
            error: i18n.translate(&locale.0, self.message_key()).to_string(),
            details,
        }
    }
}

// Resposta de erro já pronta para o cliente
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Window {
        #[validate(range(min = 1, message = "A janela deve ter pelo menos 1 dia."))]
        days: u32,
    }

    fn locale(lang: &str) -> Locale {
        Locale(lang.to_string())
    }

    #[test]
    fn no_tenant_is_a_bad_request_in_the_client_language() {
        let i18n = I18nStore::new();
        let api_err = AppError::NoTenant.to_api_error(&locale("es"), &i18n);

        assert_eq!(api_err.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_err.error, i18n.translate("es", "error.no_tenant"));
        assert!(api_err.details.is_none());
    }

    #[test]
    fn database_errors_hide_the_cause() {
        let i18n = I18nStore::new();
        let api_err = AppError::DatabaseError(sqlx::Error::PoolTimedOut)
            .to_api_error(&locale("en"), &i18n);

        assert_eq!(api_err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api_err.error.contains("pool"));
    }

    #[test]
    fn validation_errors_carry_field_details() {
        let errors = Window { days: 0 }.validate().unwrap_err();
        let api_err = AppError::ValidationError(errors).to_api_error(&locale("pt"), &I18nStore::new());

        assert_eq!(api_err.status, StatusCode::BAD_REQUEST);
        let details = api_err.details.expect("details");
        assert_eq!(details["days"][0], "A janela deve ter pelo menos 1 dia.");
    }

    #[test]
    fn malformed_query_strings_get_a_localized_body() {
        let uri: axum::http::Uri = "/api/food-cost/store-performance?days=abc".parse().unwrap();
        let rejection =
            axum::extract::Query::<crate::models::food_cost::StorePerformanceQuery>::try_from_uri(&uri)
                .unwrap_err();

        let api_err = AppError::from(rejection).to_api_error(&locale("es"), &I18nStore::new());

        assert_eq!(api_err.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_err.error, "Uno o más campos son inválidos.");
        let details = api_err.details.expect("details");
        assert!(details["query"][0]
            .as_str()
            .unwrap()
            .starts_with("Failed to deserialize query string"));
    }

    #[test]
    fn negative_window_is_a_malformed_query() {
        let uri: axum::http::Uri = "/api/food-cost/daily?days=-1".parse().unwrap();
        let rejection =
            axum::extract::Query::<crate::models::food_cost::DailySeriesQuery>::try_from_uri(&uri)
                .unwrap_err();

        let response = AppError::from(rejection)
            .to_api_error(&locale("en"), &I18nStore::new())
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_not_found_maps_to_404() {
        let api_err = AppError::StoreNotFound.to_api_error(&locale("en"), &I18nStore::new());
        assert_eq!(api_err.status, StatusCode::NOT_FOUND);
    }
}
