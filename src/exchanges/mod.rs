//! Exchange adapters over public REST endpoints

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::shared::errors::ExchangeError;
use crate::shared::types::{AssetStatus, StandardPair, StandardTicker};

pub mod bitget;
pub mod gate;
pub mod kucoin;

pub use bitget::BitgetAdapter;
pub use gate::GateAdapter;
pub use kucoin::KucoinAdapter;

/// Common interface for all exchange implementations.
///
/// Error semantics at this boundary: `Err` is a transport/parse failure,
/// `Ok(None)` means the exchange has no data for the request. Callers decide
/// per stage whether either case is fail-open or fail-closed.
#[async_trait]
pub trait ExchangeAdapter: Send + Sync {
    fn id(&self) -> &str;

    async fn fetch_all_pairs(&self) -> Result<Vec<StandardPair>, ExchangeError>;

    async fn fetch_ticker(
        &self,
        pair: &StandardPair,
    ) -> Result<Option<StandardTicker>, ExchangeError>;

    async fn get_asset_status(&self, asset: &str)
        -> Result<Option<AssetStatus>, ExchangeError>;
}

/// Build a shared HTTP client the way all adapters expect it
pub fn build_http_client(timeout_ms: u64) -> Result<reqwest::Client, ExchangeError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()?;
    Ok(client)
}

/// Create an adapter by exchange id
pub fn create_adapter(
    exchange_id: &str,
    client: reqwest::Client,
) -> Result<Arc<dyn ExchangeAdapter>, ExchangeError> {
    let adapter: Arc<dyn ExchangeAdapter> = match exchange_id {
        "kucoin" => Arc::new(KucoinAdapter::new(client)),
        "gate" => Arc::new(GateAdapter::new(client)),
        "bitget" => Arc::new(BitgetAdapter::new(client)),
        other => return Err(ExchangeError::UnsupportedExchange(other.to_string())),
    };
    Ok(adapter)
}

/// Create all enabled adapters from configuration
pub fn create_adapters(
    exchange_ids: &[String],
    timeout_ms: u64,
) -> Result<Vec<Arc<dyn ExchangeAdapter>>, ExchangeError> {
    let client = build_http_client(timeout_ms)?;
    let mut adapters = Vec::with_capacity(exchange_ids.len());
    for id in exchange_ids {
        let adapter = create_adapter(id, client.clone())?;
        info!("✅ Created {} adapter", adapter.id());
        adapters.push(adapter);
    }
    Ok(adapters)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::collections::HashSet;

    /// Scripted adapter for pipeline and validator tests
    pub struct StubExchange {
        pub id: String,
        pub pairs: Vec<StandardPair>,
        pub tickers: HashMap<String, StandardTicker>,
        pub statuses: HashMap<String, AssetStatus>,
        pub fail_tickers: bool,
        pub fail_statuses: bool,
    }

    impl StubExchange {
        pub fn new(id: &str) -> Self {
            Self {
                id: id.to_string(),
                pairs: Vec::new(),
                tickers: HashMap::new(),
                statuses: HashMap::new(),
                fail_tickers: false,
                fail_statuses: false,
            }
        }

        pub fn with_pair(mut self, base: &str, quote: &str) -> Self {
            let id = self.id.clone();
            self.pairs.push(StandardPair::new(base, quote, &id, json!({})));
            self
        }

        pub fn with_ticker(mut self, symbol: &str, bid: f64, ask: f64) -> Self {
            self.tickers.insert(
                symbol.to_string(),
                StandardTicker {
                    exchange_id: self.id.clone(),
                    price: (bid + ask) / 2.0,
                    bid,
                    ask,
                    raw: json!({}),
                },
            );
            self
        }

        pub fn with_status(
            mut self,
            asset: &str,
            can_deposit: bool,
            can_withdraw: bool,
            deposit_networks: &[&str],
            withdraw_networks: &[&str],
        ) -> Self {
            self.statuses.insert(
                asset.to_string(),
                AssetStatus {
                    can_deposit,
                    can_withdraw,
                    deposit_networks: deposit_networks
                        .iter()
                        .map(|n| n.to_string())
                        .collect::<HashSet<_>>(),
                    withdraw_networks: withdraw_networks
                        .iter()
                        .map(|n| n.to_string())
                        .collect::<HashSet<_>>(),
                    raw: json!({}),
                },
            );
            self
        }
    }

    #[async_trait]
    impl ExchangeAdapter for StubExchange {
        fn id(&self) -> &str {
            &self.id
        }

        async fn fetch_all_pairs(&self) -> Result<Vec<StandardPair>, ExchangeError> {
            Ok(self.pairs.clone())
        }

        async fn fetch_ticker(
            &self,
            pair: &StandardPair,
        ) -> Result<Option<StandardTicker>, ExchangeError> {
            if self.fail_tickers {
                return Err(ExchangeError::ApiError("stub ticker failure".to_string()));
            }
            Ok(self.tickers.get(&pair.symbol).cloned())
        }

        async fn get_asset_status(
            &self,
            asset: &str,
        ) -> Result<Option<AssetStatus>, ExchangeError> {
            if self.fail_statuses {
                return Err(ExchangeError::ApiError("stub status failure".to_string()));
            }
            Ok(self.statuses.get(asset).cloned())
        }
    }
}
