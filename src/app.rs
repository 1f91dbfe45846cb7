//! Application wiring: adapters, pipeline, persistence, summary

use anyhow::{Context, Result};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

use crate::application::ScanPipeline;
use crate::config::Config;
use crate::domain::market::resolve_shared_pairs;
use crate::exchanges::{self, ExchangeAdapter};
use crate::infrastructure::{JsonStore, OpportunityCategory};
use crate::shared::errors::AppError;
use crate::shared::types::{ScannerConfig, StandardPair};

/// Fetch every exchange's listing concurrently, treating per-exchange
/// failures as empty listings.
async fn fetch_listings(
    adapters: &[Arc<dyn ExchangeAdapter>],
) -> Vec<(String, Vec<StandardPair>)> {
    let fetches = adapters.iter().map(|adapter| async move {
        let pairs = match adapter.fetch_all_pairs().await {
            Ok(pairs) => pairs,
            Err(err) => {
                warn!("⚠️ {} listing unavailable: {}", adapter.id(), err);
                Vec::new()
            }
        };
        info!("📋 {} listed {} pairs", adapter.id(), pairs.len());
        (adapter.id().to_string(), pairs)
    });
    join_all(fetches).await
}

/// One full scan pass: resolve, enrich, detect, validate, persist
pub async fn run(config: Config) -> Result<()> {
    let adapters = exchanges::create_adapters(
        &config.exchanges.enabled,
        config.exchanges.timeout_ms,
    )
    .context("build exchange adapters")?;

    let scanner: ScannerConfig = (&config).into();
    let store = JsonStore::new(&config.store.data_dir).context("open result store")?;
    store.clear(OpportunityCategory::Executable)?;
    store.clear(OpportunityCategory::Potential)?;

    let listings = fetch_listings(&adapters).await;
    if listings.iter().all(|(_, pairs)| pairs.is_empty()) {
        // Partial outages are tolerated; a totally dark market is not.
        return Err(AppError::NoMarketData.into());
    }

    let groups = resolve_shared_pairs(listings, &scanner.quote_assets_filter);
    if groups.is_empty() {
        info!("No symbol is listed on two or more exchanges, nothing to scan");
        return Ok(());
    }

    let pipeline = ScanPipeline::new(adapters, scanner);
    let mut rx = pipeline.run(groups);

    let mut executable = 0usize;
    let mut potential = 0usize;
    while let Some(opportunity) = rx.recv().await {
        let is_executable = opportunity
            .validation
            .as_ref()
            .map(|v| v.is_executable)
            .unwrap_or(false);
        let category = if is_executable {
            executable += 1;
            OpportunityCategory::Executable
        } else {
            potential += 1;
            OpportunityCategory::Potential
        };
        info!(
            "{} {} +{:.4}%: buy {} @ {} / sell {} @ {}",
            if is_executable { "✅" } else { "📝" },
            opportunity.pair,
            opportunity.profit_percentage,
            opportunity.buy_at.exchange,
            opportunity.buy_at.price,
            opportunity.sell_at.exchange,
            opportunity.sell_at.price
        );
        store.append(&opportunity, category)?;
    }

    info!(
        "🎯 Scan complete: {} executable, {} potential",
        executable, potential
    );
    Ok(())
}
