//! Common types used across the application

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Trading pair normalized to a canonical BASE/QUOTE symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardPair {
    pub symbol: String,
    pub base: String,
    pub quote: String,
    pub exchange_id: String,
    /// Opaque exchange-specific payload, carried through for follow-up requests
    pub raw: Value,
}

impl StandardPair {
    pub fn new(base: &str, quote: &str, exchange_id: &str, raw: Value) -> Self {
        Self {
            symbol: format!("{}/{}", base, quote),
            base: base.to_string(),
            quote: quote.to_string(),
            exchange_id: exchange_id.to_string(),
            raw,
        }
    }
}

/// Instantaneous quote for one pair on one exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardTicker {
    pub exchange_id: String,
    pub price: f64,
    /// Price at which the base asset can be sold
    pub bid: f64,
    /// Price at which the base asset can be bought
    pub ask: f64,
    pub raw: Value,
}

/// Per-asset, per-exchange transfer capability snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetStatus {
    pub can_deposit: bool,
    pub can_withdraw: bool,
    /// Network names normalized to a single case by the adapter
    pub deposit_networks: HashSet<String>,
    pub withdraw_networks: HashSet<String>,
    pub raw: Value,
}

/// Symbol listed on at least two exchanges
#[derive(Debug, Clone)]
pub struct SharedPairGroup {
    pub symbol: String,
    pub members: Vec<(String, StandardPair)>,
}

/// SharedPairGroup plus the tickers that could be fetched for it
#[derive(Debug, Clone)]
pub struct EnrichedGroup {
    pub group: SharedPairGroup,
    /// Ordered like `group.members`; every entry corresponds to a member
    pub tickers: Vec<(String, StandardTicker)>,
}

/// One leg of an opportunity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeLeg {
    pub exchange: String,
    pub price: f64,
}

/// Transfer capabilities of the buy leg
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuySideInfo {
    pub can_withdraw: bool,
    pub withdraw_networks: HashSet<String>,
}

/// Transfer capabilities of the sell leg
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellSideInfo {
    pub can_deposit: bool,
    pub deposit_networks: HashSet<String>,
}

/// Raw asset-status payloads for both legs and both assets
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetDetails {
    pub buy_base: Option<AssetStatus>,
    pub buy_quote: Option<AssetStatus>,
    pub sell_base: Option<AssetStatus>,
    pub sell_quote: Option<AssetStatus>,
}

/// Executability verdict attached to an opportunity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpportunityValidation {
    pub is_executable: bool,
    pub common_networks: HashSet<String>,
    pub buy_exchange_info: BuySideInfo,
    pub sell_exchange_info: SellSideInfo,
    pub asset_details: AssetDetails,
}

/// Directional price spread that cleared the profitability threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    pub pair: String,
    pub profit_percentage: f64,
    pub buy_at: TradeLeg,
    pub sell_at: TradeLeg,
    pub timestamp: DateTime<Utc>,
    /// Absent until the executability validator runs, always present afterward
    pub validation: Option<OpportunityValidation>,
}

/// Scanner configuration consumed by the core pipeline
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Minimum acceptable spread, percent
    pub min_profit_percentage: f64,
    /// When non-empty, only pairs quoted in one of these assets are considered
    pub quote_assets_filter: HashSet<String>,
    /// Fixed delay between shared-pair groups
    pub inter_group_delay_ms: u64,
    /// Window over the shared-group list (slicing, not a data-model concept)
    pub start_index: usize,
    pub end_index: Option<usize>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            min_profit_percentage: 0.5,
            quote_assets_filter: HashSet::new(),
            inter_group_delay_ms: 500,
            start_index: 0,
            end_index: None,
        }
    }
}
