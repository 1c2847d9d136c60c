// src/services/performance_cache.rs

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::food_cost::StorePerformanceSummary;

/// Tempo padrão que um resultado fica válido.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(120);

struct CachedEntry {
    stored_at: Instant,
    summaries: Vec<StorePerformanceSummary>,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<(Uuid, u32), CachedEntry>,
    // Incrementada a cada invalidação do tenant
    generations: HashMap<Uuid, u64>,
}

/// Cache curto da performance por loja, chaveado por `(tenant, janela em dias)`.
///
/// A invalidação é só por tempo, exceto quando a meta de uma loja muda
/// (ver `invalidate_tenant`). TTL zero desliga o cache.
///
/// Quem calcula um resultado lê `generation` antes da busca e passa o valor
/// para `put`; se o tenant foi invalidado nesse meio tempo, a escrita é descartada.
pub struct StorePerformanceCache {
    ttl: Duration,
    state: RwLock<CacheState>,
}

impl StorePerformanceCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: RwLock::new(CacheState::default()),
        }
    }

    pub async fn generation(&self, tenant_id: Uuid) -> u64 {
        let state = self.state.read().await;
        state.generations.get(&tenant_id).copied().unwrap_or(0)
    }

    pub async fn get(&self, tenant_id: Uuid, window_days: u32) -> Option<Vec<StorePerformanceSummary>> {
        self.get_at(tenant_id, window_days, Instant::now()).await
    }

    async fn get_at(
        &self,
        tenant_id: Uuid,
        window_days: u32,
        now: Instant,
    ) -> Option<Vec<StorePerformanceSummary>> {
        let state = self.state.read().await;
        state
            .entries
            .get(&(tenant_id, window_days))
            .filter(|entry| now.saturating_duration_since(entry.stored_at) < self.ttl)
            .map(|entry| entry.summaries.clone())
    }

    /// Guarda o resultado se o tenant não foi invalidado desde `generation`.
    /// Devolve se a entrada foi gravada.
    pub async fn put(
        &self,
        tenant_id: Uuid,
        window_days: u32,
        summaries: Vec<StorePerformanceSummary>,
        generation: u64,
    ) -> bool {
        self.put_at(tenant_id, window_days, summaries, generation, Instant::now())
            .await
    }

    async fn put_at(
        &self,
        tenant_id: Uuid,
        window_days: u32,
        summaries: Vec<StorePerformanceSummary>,
        generation: u64,
        now: Instant,
    ) -> bool {
        if self.ttl.is_zero() {
            return false;
        }

        let mut state = self.state.write().await;
        let current = state.generations.get(&tenant_id).copied().unwrap_or(0);
        if current != generation {
            tracing::debug!(%tenant_id, window_days, "Resultado descartado: tenant invalidado durante o cálculo");
            return false;
        }

        // Aproveita a escrita para descartar o que já venceu
        let ttl = self.ttl;
        state
            .entries
            .retain(|_, entry| now.saturating_duration_since(entry.stored_at) < ttl);
        state.entries.insert(
            (tenant_id, window_days),
            CachedEntry {
                stored_at: now,
                summaries,
            },
        );
        true
    }

    /// Remove todas as janelas em cache do tenant e invalida os cálculos em
    /// andamento. Devolve quantas entradas saíram.
    pub async fn invalidate_tenant(&self, tenant_id: Uuid) -> usize {
        let mut state = self.state.write().await;
        *state.generations.entry(tenant_id).or_insert(0) += 1;

        let before = state.entries.len();
        state.entries.retain(|(tenant, _), _| *tenant != tenant_id);
        before - state.entries.len()
    }
}

impl Default for StorePerformanceCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}
