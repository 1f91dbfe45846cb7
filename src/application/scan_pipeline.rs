//! Drives the detection-and-validation pipeline over shared-pair groups

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::domain::arbitrage::detect_spreads;
use crate::domain::market::enrich_group;
use crate::domain::transfer::validate_opportunity;
use crate::exchanges::ExchangeAdapter;
use crate::shared::types::{Opportunity, ScannerConfig, SharedPairGroup};

const CHANNEL_CAPACITY: usize = 32;

/// Runs enrichment, detection and validation sequentially per group and
/// yields validated opportunities as a lazy ordered sequence.
pub struct ScanPipeline {
    adapters: HashMap<String, Arc<dyn ExchangeAdapter>>,
    config: ScannerConfig,
}

impl ScanPipeline {
    pub fn new(adapters: Vec<Arc<dyn ExchangeAdapter>>, config: ScannerConfig) -> Self {
        let adapters = adapters
            .into_iter()
            .map(|a| (a.id().to_string(), a))
            .collect();
        Self { adapters, config }
    }

    /// Spawn the producer and hand back the consuming end of the sequence.
    ///
    /// Groups are processed one at a time with a fixed delay in between, so
    /// outbound request volume stays bounded by the number of exchanges.
    /// Dropping the receiver stops the producer at the next group boundary.
    pub fn run(self, groups: Vec<SharedPairGroup>) -> mpsc::Receiver<Opportunity> {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        tokio::spawn(async move {
            self.produce(groups, tx).await;
        });
        rx
    }

    async fn produce(self, groups: Vec<SharedPairGroup>, tx: mpsc::Sender<Opportunity>) {
        let total = groups.len();
        let end = self.config.end_index.unwrap_or(total).min(total);
        let start = self.config.start_index.min(end);
        info!(
            "🔍 Scanning groups {}..{} of {}",
            start, end, total
        );

        let windowed = groups.into_iter().skip(start).take(end - start);
        let mut first = true;
        for group in windowed {
            if tx.is_closed() {
                debug!("consumer gone, stopping scan");
                return;
            }
            if !first {
                sleep(Duration::from_millis(self.config.inter_group_delay_ms)).await;
            }
            first = false;

            if self.scan_group(group, &tx).await.is_err() {
                return;
            }
        }
    }

    /// Err means the consumer hung up; everything else is swallowed per item.
    async fn scan_group(
        &self,
        group: SharedPairGroup,
        tx: &mpsc::Sender<Opportunity>,
    ) -> Result<(), ()> {
        let symbol = group.symbol.clone();
        let enriched = match enrich_group(group, &self.adapters).await {
            Some(enriched) => enriched,
            None => return Ok(()),
        };

        let candidates = detect_spreads(&enriched, self.config.min_profit_percentage);
        for candidate in candidates {
            let buy = self.adapters.get(&candidate.buy_at.exchange);
            let sell = self.adapters.get(&candidate.sell_at.exchange);
            let (buy, sell) = match (buy, sell) {
                (Some(b), Some(s)) => (b, s),
                _ => {
                    warn!("no adapter for a leg of {}, dropping candidate", symbol);
                    continue;
                }
            };

            match validate_opportunity(candidate, buy, sell).await {
                Ok(validated) => {
                    if tx.send(validated).await.is_err() {
                        return Err(());
                    }
                }
                Err(err) => {
                    warn!("⚠️ Validation failed for {}: {}", symbol, err);
                }
            }
        }
        Ok(())
    }
}
