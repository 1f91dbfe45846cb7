//! KuCoin public REST adapter

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::shared::errors::ExchangeError;
use crate::shared::types::{AssetStatus, StandardPair, StandardTicker};
use crate::shared::utils::normalize_network;
use super::ExchangeAdapter;

const BASE_URL: &str = "https://api.kucoin.com";

#[derive(Debug, Deserialize)]
struct KucoinEnvelope<T> {
    code: String,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct KucoinSymbol {
    symbol: String,
    #[serde(rename = "baseCurrency")]
    base_currency: String,
    #[serde(rename = "quoteCurrency")]
    quote_currency: String,
    #[serde(rename = "enableTrading")]
    enable_trading: bool,
}

#[derive(Debug, Deserialize)]
struct KucoinLevel1 {
    price: Option<String>,
    #[serde(rename = "bestBid")]
    best_bid: Option<String>,
    #[serde(rename = "bestAsk")]
    best_ask: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KucoinCurrency {
    currency: String,
    chains: Option<Vec<KucoinChain>>,
}

#[derive(Debug, Deserialize)]
struct KucoinChain {
    #[serde(rename = "chainName")]
    chain_name: String,
    #[serde(rename = "isDepositEnabled")]
    is_deposit_enabled: bool,
    #[serde(rename = "isWithdrawEnabled")]
    is_withdraw_enabled: bool,
}

pub struct KucoinAdapter {
    client: Client,
}

impl KucoinAdapter {
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
impl ExchangeAdapter for KucoinAdapter {
    fn id(&self) -> &str {
        "kucoin"
    }

    async fn fetch_all_pairs(&self) -> Result<Vec<StandardPair>, ExchangeError> {
        let url = format!("{}/api/v2/symbols", BASE_URL);
        let envelope: KucoinEnvelope<Vec<KucoinSymbol>> =
            self.client.get(&url).send().await?.json().await?;

        if envelope.code != "200000" {
            return Err(ExchangeError::ApiError(format!(
                "kucoin symbols returned code {}",
                envelope.code
            )));
        }

        let symbols = envelope.data.unwrap_or_default();
        let pairs = symbols
            .into_iter()
            .filter(|s| s.enable_trading)
            .map(|s| {
                StandardPair::new(
                    &s.base_currency.to_uppercase(),
                    &s.quote_currency.to_uppercase(),
                    "kucoin",
                    serde_json::json!({ "symbol": s.symbol }),
                )
            })
            .collect::<Vec<_>>();

        debug!("kucoin returned {} tradable pairs", pairs.len());
        Ok(pairs)
    }

    async fn fetch_ticker(
        &self,
        pair: &StandardPair,
    ) -> Result<Option<StandardTicker>, ExchangeError> {
        let native = pair.raw["symbol"]
            .as_str()
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("{}-{}", pair.base, pair.quote));
        let url = format!("{}/api/v1/market/orderbook/level1?symbol={}", BASE_URL, native);
        let envelope: KucoinEnvelope<KucoinLevel1> =
            self.client.get(&url).send().await?.json().await?;

        let level1 = match envelope.data {
            Some(data) if envelope.code == "200000" => data,
            _ => return Ok(None),
        };

        let bid = parse_price(&level1.best_bid);
        let ask = parse_price(&level1.best_ask);
        if bid <= 0.0 && ask <= 0.0 {
            return Ok(None);
        }

        Ok(Some(StandardTicker {
            exchange_id: "kucoin".to_string(),
            price: parse_price(&level1.price),
            bid,
            ask,
            raw: serde_json::json!({ "symbol": native }),
        }))
    }

    async fn get_asset_status(
        &self,
        asset: &str,
    ) -> Result<Option<AssetStatus>, ExchangeError> {
        let url = format!("{}/api/v3/currencies/{}", BASE_URL, asset);
        let response = self.client.get(&url).send().await?;
        let envelope: KucoinEnvelope<KucoinCurrency> = response.json().await?;

        let currency = match envelope.data {
            Some(data) if envelope.code == "200000" => data,
            _ => {
                warn!("kucoin has no currency data for {}", asset);
                return Ok(None);
            }
        };

        let chains = currency.chains.unwrap_or_default();
        let mut status = AssetStatus {
            can_deposit: false,
            can_withdraw: false,
            deposit_networks: Default::default(),
            withdraw_networks: Default::default(),
            raw: serde_json::json!({ "currency": currency.currency }),
        };
        for chain in &chains {
            let network = normalize_network(&chain.chain_name);
            if chain.is_deposit_enabled {
                status.can_deposit = true;
                status.deposit_networks.insert(network.clone());
            }
            if chain.is_withdraw_enabled {
                status.can_withdraw = true;
                status.withdraw_networks.insert(network);
            }
        }

        Ok(Some(status))
    }
}
