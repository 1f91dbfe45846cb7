//! Gate.io public REST adapter

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::shared::errors::ExchangeError;
use crate::shared::types::{AssetStatus, StandardPair, StandardTicker};
use crate::shared::utils::normalize_network;
use super::ExchangeAdapter;

const BASE_URL: &str = "https://api.gateio.ws/api/v4";

#[derive(Debug, Deserialize)]
struct GatePair {
    id: String,
    base: String,
    quote: String,
    trade_status: String,
}

#[derive(Debug, Deserialize)]
struct GateTicker {
    last: Option<String>,
    highest_bid: Option<String>,
    lowest_ask: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GateCurrencyChain {
    chain: String,
    // Gate reports disable flags as 0/1 integers
    is_disabled: u8,
    is_deposit_disabled: u8,
    is_withdraw_disabled: u8,
}

pub struct GateAdapter {
    client: Client,
}

impl GateAdapter {
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
impl ExchangeAdapter for GateAdapter {
    fn id(&self) -> &str {
        "gate"
    }

    async fn fetch_all_pairs(&self) -> Result<Vec<StandardPair>, ExchangeError> {
        let url = format!("{}/spot/currency_pairs", BASE_URL);
        let listed: Vec<GatePair> = self.client.get(&url).send().await?.json().await?;

        let pairs = listed
            .into_iter()
            .filter(|p| p.trade_status == "tradable")
            .map(|p| {
                StandardPair::new(
                    &p.base.to_uppercase(),
                    &p.quote.to_uppercase(),
                    "gate",
                    serde_json::json!({ "id": p.id }),
                )
            })
            .collect::<Vec<_>>();

        debug!("gate returned {} tradable pairs", pairs.len());
        Ok(pairs)
    }

    async fn fetch_ticker(
        &self,
        pair: &StandardPair,
    ) -> Result<Option<StandardTicker>, ExchangeError> {
        let native = pair.raw["id"]
            .as_str()
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("{}_{}", pair.base, pair.quote));
        let url = format!("{}/spot/tickers?currency_pair={}", BASE_URL, native);
        let tickers: Vec<GateTicker> = self.client.get(&url).send().await?.json().await?;

        let ticker = match tickers.into_iter().next() {
            Some(t) => t,
            None => return Ok(None),
        };

        let bid = parse_price(&ticker.highest_bid);
        let ask = parse_price(&ticker.lowest_ask);
        if bid <= 0.0 && ask <= 0.0 {
            return Ok(None);
        }

        Ok(Some(StandardTicker {
            exchange_id: "gate".to_string(),
            price: parse_price(&ticker.last),
            bid,
            ask,
            raw: serde_json::json!({ "currency_pair": native }),
        }))
    }

    async fn get_asset_status(
        &self,
        asset: &str,
    ) -> Result<Option<AssetStatus>, ExchangeError> {
        let url = format!("{}/wallet/currency_chains?currency={}", BASE_URL, asset);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            warn!("gate has no chain data for {}", asset);
            return Ok(None);
        }
        let chains: Vec<GateCurrencyChain> = response.json().await?;
        if chains.is_empty() {
            return Ok(None);
        }

        let mut status = AssetStatus {
            can_deposit: false,
            can_withdraw: false,
            deposit_networks: Default::default(),
            withdraw_networks: Default::default(),
            raw: serde_json::json!({ "currency": asset }),
        };
        for chain in &chains {
            if chain.is_disabled != 0 {
                continue;
            }
            let network = normalize_network(&chain.chain);
            if chain.is_deposit_disabled == 0 {
                status.can_deposit = true;
                status.deposit_networks.insert(network.clone());
            }
            if chain.is_withdraw_disabled == 0 {
                status.can_withdraw = true;
                status.withdraw_networks.insert(network);
            }
        }

        Ok(Some(status))
    }
}
