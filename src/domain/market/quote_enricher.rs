//! Fans ticker requests out over a shared-pair group

use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::exchanges::ExchangeAdapter;
use crate::shared::types::{EnrichedGroup, SharedPairGroup};

/// Fetch one ticker per group member concurrently.
///
/// A request that fails or returns no usable ticker drops that member only
/// (fail-open); a single exchange outage must not block comparisons among the
/// rest. Returns `None` when fewer than two usable tickers remain.
pub async fn enrich_group(
    group: SharedPairGroup,
    adapters: &HashMap<String, Arc<dyn ExchangeAdapter>>,
) -> Option<EnrichedGroup> {
    let fetches = group.members.iter().map(|(exchange_id, pair)| {
        let adapter = adapters.get(exchange_id).cloned();
        async move {
            let adapter = adapter?;
            match adapter.fetch_ticker(pair).await {
                Ok(Some(ticker)) => Some((adapter.id().to_string(), ticker)),
                Ok(None) => None,
                Err(err) => {
                    debug!("ticker fetch failed on {}: {}", adapter.id(), err);
                    None
                }
            }
        }
    });

    let tickers: Vec<_> = join_all(fetches).await.into_iter().flatten().collect();
    if tickers.len() < 2 {
        debug!(
            "⚠️ Dropping {}: only {} usable ticker(s)",
            group.symbol,
            tickers.len()
        );
        return None;
    }

    Some(EnrichedGroup { group, tickers })
}
