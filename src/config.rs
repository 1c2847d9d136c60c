// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use axum::extract::FromRef;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::i18n::I18nStore,
    db::{FoodCostRepository, StoreRepository},
    services::{
        performance_cache::{StorePerformanceCache, DEFAULT_CACHE_TTL},
        store_performance::StorePerformanceService,
        store_service::StoreService,
    },
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

// Configuração lida do ambiente (.env + variáveis do processo)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub store_performance_cache_ttl: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL deve ser definida")?;

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("DB_MAX_CONNECTIONS inválido: {raw}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let store_performance_cache_ttl = match lookup("STORE_PERFORMANCE_CACHE_TTL_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse()
                    .with_context(|| format!("STORE_PERFORMANCE_CACHE_TTL_SECS inválido: {raw}"))?,
            ),
            None => DEFAULT_CACHE_TTL,
        };

        Ok(Self {
            database_url,
            bind_addr,
            db_max_connections,
            store_performance_cache_ttl,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub i18n_store: Arc<I18nStore>,
    pub store_performance_service: StorePerformanceService,
    pub store_service: StoreService,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let cache = Arc::new(StorePerformanceCache::new(config.store_performance_cache_ttl));
        let food_cost_repo = Arc::new(FoodCostRepository::new(db_pool.clone()));
        let store_repo = Arc::new(StoreRepository::new(db_pool.clone()));

        let store_performance_service = StorePerformanceService::new(food_cost_repo, cache.clone());
        let store_service = StoreService::new(store_repo, cache);

        Ok(Self {
            db_pool,
            i18n_store: Arc::new(I18nStore::new()),
            store_performance_service,
            store_service,
        })
    }
}

// Permite que os extratores peguem só o catálogo de mensagens
impl FromRef<AppState> for Arc<I18nStore> {
    fn from_ref(state: &AppState) -> Self {
        state.i18n_store.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn applies_defaults() {
        let config = config_from(&[("DATABASE_URL", "postgres://localhost/counteros")]).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.store_performance_cache_ttl, Duration::from_secs(120));
    }

    #[test]
    fn database_url_is_required() {
        assert!(config_from(&[]).is_err());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("DATABASE_URL", "postgres://localhost/counteros"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("STORE_PERFORMANCE_CACHE_TTL_SECS", "0"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.db_max_connections, 12);
        assert!(config.store_performance_cache_ttl.is_zero());
    }

    #[test]
    fn rejects_malformed_numbers() {
        let err = config_from(&[
            ("DATABASE_URL", "postgres://localhost/counteros"),
            ("DB_MAX_CONNECTIONS", "cinco"),
        ])
        .unwrap_err();

        assert!(err.to_string().contains("DB_MAX_CONNECTIONS"));
    }
}
