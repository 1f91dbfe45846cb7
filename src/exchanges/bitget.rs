//! Bitget public REST adapter

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::shared::errors::ExchangeError;
use crate::shared::types::{AssetStatus, StandardPair, StandardTicker};
use crate::shared::utils::normalize_network;
use super::ExchangeAdapter;

const BASE_URL: &str = "https://api.bitget.com";

#[derive(Debug, Deserialize)]
struct BitgetEnvelope<T> {
    code: String,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct BitgetSymbol {
    symbol: String,
    #[serde(rename = "baseCoin")]
    base_coin: String,
    #[serde(rename = "quoteCoin")]
    quote_coin: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct BitgetTicker {
    #[serde(rename = "lastPr")]
    last_pr: Option<String>,
    #[serde(rename = "bidPr")]
    bid_pr: Option<String>,
    #[serde(rename = "askPr")]
    ask_pr: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BitgetCoin {
    coin: String,
    chains: Option<Vec<BitgetChain>>,
}

#[derive(Debug, Deserialize)]
struct BitgetChain {
    chain: String,
    // Bitget reports capability flags as "true"/"false" strings
    rechargeable: String,
    withdrawable: String,
}

pub struct BitgetAdapter {
    client: Client,
}

impl BitgetAdapter {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

fn parse_price(value: &Option<String>) -> f64 {
    value
        .as_deref()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0)
}

#[async_trait]
impl ExchangeAdapter for BitgetAdapter {
    fn id(&self) -> &str {
        "bitget"
    }

    async fn fetch_all_pairs(&self) -> Result<Vec<StandardPair>, ExchangeError> {
        let url = format!("{}/api/v2/spot/public/symbols", BASE_URL);
        let envelope: BitgetEnvelope<Vec<BitgetSymbol>> =
            self.client.get(&url).send().await?.json().await?;

        if envelope.code != "00000" {
            return Err(ExchangeError::ApiError(format!(
                "bitget symbols returned code {}",
                envelope.code
            )));
        }

        let symbols = envelope.data.unwrap_or_default();
        let pairs = symbols
            .into_iter()
            .filter(|s| s.status == "online")
            .map(|s| {
                StandardPair::new(
                    &s.base_coin.to_uppercase(),
                    &s.quote_coin.to_uppercase(),
                    "bitget",
                    serde_json::json!({ "symbol": s.symbol }),
                )
            })
            .collect::<Vec<_>>();

        debug!("bitget returned {} online pairs", pairs.len());
        Ok(pairs)
    }

    async fn fetch_ticker(
        &self,
        pair: &StandardPair,
    ) -> Result<Option<StandardTicker>, ExchangeError> {
        let native = pair.raw["symbol"]
            .as_str()
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("{}{}", pair.base, pair.quote));
        let url = format!("{}/api/v2/spot/market/tickers?symbol={}", BASE_URL, native);
        let envelope: BitgetEnvelope<Vec<BitgetTicker>> =
            self.client.get(&url).send().await?.json().await?;

        let ticker = match envelope.data.and_then(|mut d| {
            if d.is_empty() {
                None
            } else {
                Some(d.remove(0))
            }
        }) {
            Some(t) if envelope.code == "00000" => t,
            _ => return Ok(None),
        };

        let bid = parse_price(&ticker.bid_pr);
        let ask = parse_price(&ticker.ask_pr);
        if bid <= 0.0 && ask <= 0.0 {
            return Ok(None);
        }

        Ok(Some(StandardTicker {
            exchange_id: "bitget".to_string(),
            price: parse_price(&ticker.last_pr),
            bid,
            ask,
            raw: serde_json::json!({ "symbol": native }),
        }))
    }

    async fn get_asset_status(
        &self,
        asset: &str,
    ) -> Result<Option<AssetStatus>, ExchangeError> {
        let url = format!("{}/api/v2/spot/public/coins?coin={}", BASE_URL, asset);
        let envelope: BitgetEnvelope<Vec<BitgetCoin>> =
            self.client.get(&url).send().await?.json().await?;

        let coin = match envelope.data.and_then(|mut d| {
            if d.is_empty() {
                None
            } else {
                Some(d.remove(0))
            }
        }) {
            Some(c) if envelope.code == "00000" => c,
            _ => {
                warn!("bitget has no coin data for {}", asset);
                return Ok(None);
            }
        };

        let chains = coin.chains.unwrap_or_default();
        let mut status = AssetStatus {
            can_deposit: false,
            can_withdraw: false,
            deposit_networks: Default::default(),
            withdraw_networks: Default::default(),
            raw: serde_json::json!({ "coin": coin.coin }),
        };
        for chain in &chains {
            let network = normalize_network(&chain.chain);
            if chain.rechargeable == "true" {
                status.can_deposit = true;
                status.deposit_networks.insert(network.clone());
            }
            if chain.withdrawable == "true" {
                status.can_withdraw = true;
                status.withdraw_networks.insert(network);
            }
        }

        Ok(Some(status))
    }
}
