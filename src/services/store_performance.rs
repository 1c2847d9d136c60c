// src/services/store_performance.rs

use std::{collections::HashMap, sync::Arc};

use chrono::{Days, NaiveDate, Utc};
use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::DailyFoodCostSource,
    models::food_cost::{DailyFoodCostRecord, StorePerformanceSummary, Trending, MAX_WINDOW_DAYS},
    services::performance_cache::StorePerformanceCache,
};

/// Meta usada quando a loja não tem meta configurada.
pub const DEFAULT_TARGET_FOOD_COST_PCT: Decimal = Decimal::from_parts(285, 0, 0, false, 1);

// Diferença mínima (em pontos percentuais) entre as metades da janela para
// considerar que houve tendência.
const TREND_THRESHOLD: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Janela retroativa `[today - window_days, today]`, inclusiva nas duas pontas.
/// `window_days` é limitado a `MAX_WINDOW_DAYS` para a data inicial continuar
/// dentro do intervalo aceito pelo Postgres.
pub fn trailing_window(today: NaiveDate, window_days: u32) -> (NaiveDate, NaiveDate) {
    let window_days = window_days.min(MAX_WINDOW_DAYS);
    let start = today
        .checked_sub_days(Days::new(u64::from(window_days)))
        .unwrap_or(NaiveDate::MIN);
    (start, today)
}

fn round_one_decimal(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

fn round_whole(value: Decimal) -> i64 {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    rounded.to_i64().unwrap_or(if rounded.is_sign_negative() { i64::MIN } else { i64::MAX })
}

// Registros sem food cost entram como 0 e continuam contando no divisor.
fn mean_food_cost(records: &[&DailyFoodCostRecord]) -> Decimal {
    let sum: Decimal = records
        .iter()
        .map(|r| r.food_cost_pct.unwrap_or(Decimal::ZERO))
        .sum();
    sum / Decimal::from(records.len())
}

// Compara a média da segunda metade da janela com a da primeira.
// Em contagens ímpares a primeira metade fica com o registro a menos.
fn classify_trend(records: &[&DailyFoodCostRecord]) -> Trending {
    let mid = records.len() / 2;
    let (first_half, second_half) = records.split_at(mid);

    if first_half.is_empty() || second_half.is_empty() {
        return Trending::Stable;
    }

    let first = mean_food_cost(first_half);
    let second = mean_food_cost(second_half);

    if second > first + TREND_THRESHOLD {
        Trending::Up
    } else if second < first - TREND_THRESHOLD {
        Trending::Down
    } else {
        Trending::Stable
    }
}

fn summarize_store(records: &[&DailyFoodCostRecord]) -> StorePerformanceSummary {
    // Grupos só existem a partir de pelo menos um registro
    let first = records[0];

    let avg_food_cost = round_one_decimal(mean_food_cost(records));
    let target = first
        .target_food_cost_pct
        .unwrap_or(DEFAULT_TARGET_FOOD_COST_PCT);
    let delta = round_one_decimal(avg_food_cost - target);

    let total_revenue: Decimal = records.iter().map(|r| r.total_revenue).sum();
    let total_purchases: Decimal = records.iter().map(|r| r.total_purchases).sum();

    StorePerformanceSummary {
        store_id: first.store_id,
        store_name: first.store_name.clone(),
        avg_food_cost,
        target,
        delta,
        trending: classify_trend(records),
        total_ventas: round_whole(total_revenue),
        total_compras: round_whole(total_purchases),
    }
}

/// Agrupa os registros por loja e devolve um resumo por loja, da pior (maior
/// delta acima da meta) para a melhor.
///
/// Espera os registros em ordem crescente de data, como a busca entrega. Os
/// grupos ficam na ordem em que cada loja aparece pela primeira vez, e essa
/// ordem é mantida nos empates de delta.
pub fn aggregate_store_performance(records: &[DailyFoodCostRecord]) -> Vec<StorePerformanceSummary> {
    let mut index: HashMap<Uuid, usize> = HashMap::new();
    let mut groups: Vec<Vec<&DailyFoodCostRecord>> = Vec::new();

    for record in records {
        let slot = *index.entry(record.store_id).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(record);
    }

    let mut summaries: Vec<StorePerformanceSummary> =
        groups.iter().map(|group| summarize_store(group)).collect();

    // `sort_by` é estável
    summaries.sort_by(|a, b| b.delta.cmp(&a.delta));
    summaries
}

#[derive(Clone)]
pub struct StorePerformanceService {
    source: Arc<dyn DailyFoodCostSource>,
    cache: Arc<StorePerformanceCache>,
}

impl StorePerformanceService {
    pub fn new(source: Arc<dyn DailyFoodCostSource>, cache: Arc<StorePerformanceCache>) -> Self {
        Self { source, cache }
    }

    /// Performance por loja na janela dos últimos `window_days` dias até hoje (UTC).
    pub async fn compute_store_performance(
        &self,
        tenant_id: Option<Uuid>,
        window_days: u32,
    ) -> Result<Vec<StorePerformanceSummary>, AppError> {
        self.compute_store_performance_as_of(tenant_id, window_days, Utc::now().date_naive())
            .await
    }

    /// Mesmo cálculo, com "hoje" fixado por quem chama. As duas pontas da
    /// janela saem daqui uma única vez.
    pub async fn compute_store_performance_as_of(
        &self,
        tenant_id: Option<Uuid>,
        window_days: u32,
        today: NaiveDate,
    ) -> Result<Vec<StorePerformanceSummary>, AppError> {
        let tenant_id = tenant_id.ok_or(AppError::NoTenant)?;
        let (start, end) = trailing_window(today, window_days);

        let records = self
            .source
            .fetch_daily_food_costs(tenant_id, start, end, None)
            .await?;

        let summaries = aggregate_store_performance(&records);

        tracing::info!(
            %tenant_id,
            window_days,
            records = records.len(),
            stores = summaries.len(),
            "📊 Performance por loja calculada"
        );

        Ok(summaries)
    }

    /// Versão com cache curto por `(tenant, window_days)`. Erros não são cacheados.
    pub async fn get_store_performance(
        &self,
        tenant_id: Option<Uuid>,
        window_days: u32,
    ) -> Result<Vec<StorePerformanceSummary>, AppError> {
        let tenant = tenant_id.ok_or(AppError::NoTenant)?;

        // Lida antes do cálculo: se a meta mudar no meio, o resultado não entra no cache
        let generation = self.cache.generation(tenant).await;

        if let Some(cached) = self.cache.get(tenant, window_days).await {
            tracing::debug!(tenant_id = %tenant, window_days, "Performance por loja servida do cache");
            return Ok(cached);
        }

        let summaries = self.compute_store_performance(Some(tenant), window_days).await?;
        self.cache
            .put(tenant, window_days, summaries.clone(), generation)
            .await;

        Ok(summaries)
    }

    /// Registros diários crus da janela (gráfico de food cost), opcionalmente de uma loja só.
    pub async fn daily_series(
        &self,
        tenant_id: Option<Uuid>,
        window_days: u32,
        store_id: Option<Uuid>,
    ) -> Result<Vec<DailyFoodCostRecord>, AppError> {
        let tenant_id = tenant_id.ok_or(AppError::NoTenant)?;
        let (start, end) = trailing_window(Utc::now().date_naive(), window_days);

        self.source
            .fetch_daily_food_costs(tenant_id, start, end, store_id)
            .await
    }
}
