use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::{fs, path::Path};

use crate::shared::types::ScannerConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct ScannerCfg {
    pub min_profit_percentage: f64,
    #[serde(default)]
    pub quote_assets: Vec<String>,
    #[serde(default = "default_delay_ms")]
    pub inter_group_delay_ms: u64,
    #[serde(default)]
    pub start_index: usize,
    pub end_index: Option<usize>,
}

fn default_delay_ms() -> u64 {
    500
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExchangesCfg {
    pub enabled: Vec<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    10_000
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreCfg {
    pub data_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub scanner: ScannerCfg,
    pub exchanges: ExchangesCfg,
    pub store: StoreCfg,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())?;
        let cfg: Self = toml::from_str(&s).context("parse Config.toml")?;
        Ok(cfg)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scanner: ScannerCfg {
                min_profit_percentage: 0.5,
                quote_assets: vec!["USDT".to_string()],
                inter_group_delay_ms: default_delay_ms(),
                start_index: 0,
                end_index: None,
            },
            exchanges: ExchangesCfg {
                enabled: vec![
                    "kucoin".to_string(),
                    "gate".to_string(),
                    "bitget".to_string(),
                ],
                timeout_ms: default_timeout_ms(),
            },
            store: StoreCfg {
                data_dir: "data".to_string(),
            },
        }
    }
}

impl From<&Config> for ScannerConfig {
    fn from(cfg: &Config) -> Self {
        Self {
            min_profit_percentage: cfg.scanner.min_profit_percentage,
            quote_assets_filter: cfg
                .scanner
                .quote_assets
                .iter()
                .map(|q| q.to_uppercase())
                .collect::<HashSet<_>>(),
            inter_group_delay_ms: cfg.scanner.inter_group_delay_ms,
            start_index: cfg.scanner.start_index,
            end_index: cfg.scanner.end_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [scanner]
            min_profit_percentage = 1.5
            quote_assets = ["USDT", "usdc"]
            inter_group_delay_ms = 250
            start_index = 5
            end_index = 50

            [exchanges]
            enabled = ["kucoin", "gate"]
            timeout_ms = 5000

            [store]
            data_dir = "/tmp/spreadscan"
        "#;
        let cfg: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.scanner.min_profit_percentage, 1.5);
        assert_eq!(cfg.exchanges.enabled.len(), 2);

        let scanner: ScannerConfig = (&cfg).into();
        // Quote filter is normalized to upper case
        assert!(scanner.quote_assets_filter.contains("USDC"));
        assert_eq!(scanner.end_index, Some(50));
    }

    #[test]
    fn test_defaults_fill_optional_fields() {
        let toml_str = r#"
            [scanner]
            min_profit_percentage = 0.8

            [exchanges]
            enabled = ["kucoin", "bitget"]

            [store]
            data_dir = "data"
        "#;
        let cfg: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.scanner.inter_group_delay_ms, 500);
        assert_eq!(cfg.exchanges.timeout_ms, 10_000);
        assert!(cfg.scanner.quote_assets.is_empty());

        let scanner: ScannerConfig = (&cfg).into();
        // Empty filter means all quote assets are considered
        assert!(scanner.quote_assets_filter.is_empty());
        assert_eq!(scanner.end_index, None);
    }
}
