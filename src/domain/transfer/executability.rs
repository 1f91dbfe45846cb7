//! Validates that an opportunity can actually be executed

use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

use crate::exchanges::ExchangeAdapter;
use crate::shared::errors::{ExchangeError, ValidationError};
use crate::shared::types::{
    AssetDetails, AssetStatus, BuySideInfo, Opportunity, OpportunityValidation, SellSideInfo,
};
use crate::shared::utils::split_symbol;

fn lookup_failed(exchange: &str, source: ExchangeError) -> ValidationError {
    ValidationError::StatusLookupFailed {
        exchange: exchange.to_string(),
        source,
    }
}

/// Check whether the traded asset can move from the buy exchange to the sell
/// exchange, and attach the verdict to the opportunity.
///
/// All four asset-status lookups run concurrently; the quote-asset lookups
/// are informational detail carried in `asset_details`. A transport error on
/// any leg fails the whole candidate (fail-closed) — an unvalidated candidate
/// must never be reported as executable. An exchange that simply does not
/// know the asset yields default-false capabilities instead.
pub async fn validate_opportunity(
    mut opportunity: Opportunity,
    buy_adapter: &Arc<dyn ExchangeAdapter>,
    sell_adapter: &Arc<dyn ExchangeAdapter>,
) -> Result<Opportunity, ValidationError> {
    let (base_asset, quote_asset) = split_symbol(&opportunity.pair)
        .ok_or_else(|| ValidationError::MalformedSymbol(opportunity.pair.clone()))?;

    let (buy_base, buy_quote, sell_base, sell_quote) = tokio::join!(
        buy_adapter.get_asset_status(base_asset),
        buy_adapter.get_asset_status(quote_asset),
        sell_adapter.get_asset_status(base_asset),
        sell_adapter.get_asset_status(quote_asset),
    );

    let buy_base = buy_base.map_err(|e| lookup_failed(buy_adapter.id(), e))?;
    let buy_quote = buy_quote.map_err(|e| lookup_failed(buy_adapter.id(), e))?;
    let sell_base = sell_base.map_err(|e| lookup_failed(sell_adapter.id(), e))?;
    let sell_quote = sell_quote.map_err(|e| lookup_failed(sell_adapter.id(), e))?;

    let can_withdraw = buy_base.as_ref().map(|s| s.can_withdraw).unwrap_or(false);
    let can_deposit = sell_base.as_ref().map(|s| s.can_deposit).unwrap_or(false);

    let withdraw_networks = networks(&buy_base, |s| &s.withdraw_networks);
    let deposit_networks = networks(&sell_base, |s| &s.deposit_networks);
    let common_networks: HashSet<String> = withdraw_networks
        .intersection(&deposit_networks)
        .cloned()
        .collect();

    let is_executable = can_withdraw && can_deposit && !common_networks.is_empty();
    if is_executable {
        info!(
            "✅ {} is executable via {:?} ({} -> {})",
            opportunity.pair,
            common_networks,
            buy_adapter.id(),
            sell_adapter.id()
        );
    }

    opportunity.validation = Some(OpportunityValidation {
        is_executable,
        common_networks,
        buy_exchange_info: BuySideInfo {
            can_withdraw,
            withdraw_networks,
        },
        sell_exchange_info: SellSideInfo {
            can_deposit,
            deposit_networks,
        },
        asset_details: AssetDetails {
            buy_base,
            buy_quote,
            sell_base,
            sell_quote,
        },
    });

    Ok(opportunity)
}

fn networks(
    status: &Option<AssetStatus>,
    select: impl Fn(&AssetStatus) -> &HashSet<String>,
) -> HashSet<String> {
    status.as_ref().map(|s| select(s).clone()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::exchanges::testing::StubExchange;
    use crate::shared::types::TradeLeg;

    fn candidate() -> Opportunity {
        Opportunity {
            pair: "AAA/USDT".to_string(),
            profit_percentage: 3.0,
            buy_at: TradeLeg {
                exchange: "x".to_string(),
                price: 100.0,
            },
            sell_at: TradeLeg {
                exchange: "y".to_string(),
                price: 103.0,
            },
            timestamp: Utc::now(),
            validation: None,
        }
    }

    fn arc(ex: StubExchange) -> Arc<dyn ExchangeAdapter> {
        Arc::new(ex)
    }

    #[tokio::test]
    async fn test_scenario_c_disjoint_networks_not_executable() {
        let buy = arc(StubExchange::new("x").with_status("AAA", true, true, &[], &["ERC20"]));
        let sell = arc(StubExchange::new("y").with_status("AAA", true, true, &["TRC20"], &[]));

        let validated = validate_opportunity(candidate(), &buy, &sell).await.unwrap();
        let validation = validated.validation.unwrap();
        assert!(!validation.is_executable);
        assert!(validation.common_networks.is_empty());
    }

    #[tokio::test]
    async fn test_scenario_d_shared_network_is_executable() {
        let buy = arc(StubExchange::new("x").with_status("AAA", true, true, &[], &["ERC20"]));
        let sell = arc(
            StubExchange::new("y").with_status("AAA", true, true, &["ERC20", "TRC20"], &[]),
        );

        let validated = validate_opportunity(candidate(), &buy, &sell).await.unwrap();
        let validation = validated.validation.unwrap();
        assert!(validation.is_executable);
        assert_eq!(
            validation.common_networks,
            ["ERC20".to_string()].into_iter().collect()
        );
    }

    #[tokio::test]
    async fn test_common_networks_subset_of_both_legs() {
        let buy = arc(StubExchange::new("x").with_status(
            "AAA",
            true,
            true,
            &[],
            &["ERC20", "BEP20", "SOL"],
        ));
        let sell = arc(StubExchange::new("y").with_status(
            "AAA",
            true,
            true,
            &["ERC20", "SOL", "TRC20"],
            &[],
        ));

        let validated = validate_opportunity(candidate(), &buy, &sell).await.unwrap();
        let validation = validated.validation.unwrap();
        assert!(validation
            .common_networks
            .is_subset(&validation.buy_exchange_info.withdraw_networks));
        assert!(validation
            .common_networks
            .is_subset(&validation.sell_exchange_info.deposit_networks));
        assert!(validation.is_executable);
    }

    #[tokio::test]
    async fn test_withdrawals_suspended_blocks_execution() {
        // Networks overlap but the buy leg cannot withdraw
        let buy = arc(StubExchange::new("x").with_status("AAA", true, false, &[], &[]));
        let sell = arc(StubExchange::new("y").with_status("AAA", true, true, &["ERC20"], &[]));

        let validated = validate_opportunity(candidate(), &buy, &sell).await.unwrap();
        assert!(!validated.validation.unwrap().is_executable);
    }

    #[tokio::test]
    async fn test_unknown_asset_defaults_to_not_executable() {
        let buy = arc(StubExchange::new("x"));
        let sell = arc(StubExchange::new("y").with_status("AAA", true, true, &["ERC20"], &[]));

        let validated = validate_opportunity(candidate(), &buy, &sell).await.unwrap();
        let validation = validated.validation.unwrap();
        assert!(!validation.is_executable);
        assert!(!validation.buy_exchange_info.can_withdraw);
        assert!(validation.asset_details.buy_base.is_none());
    }

    #[tokio::test]
    async fn test_lookup_failure_drops_the_candidate() {
        let mut failing = StubExchange::new("x");
        failing.fail_statuses = true;
        let buy = arc(failing);
        let sell = arc(StubExchange::new("y").with_status("AAA", true, true, &["ERC20"], &[]));

        let result = validate_opportunity(candidate(), &buy, &sell).await;
        assert!(matches!(
            result,
            Err(ValidationError::StatusLookupFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_malformed_symbol_is_rejected() {
        let mut opp = candidate();
        opp.pair = "AAAUSDT".to_string();
        let buy = arc(StubExchange::new("x"));
        let sell = arc(StubExchange::new("y"));

        let result = validate_opportunity(opp, &buy, &sell).await;
        assert!(matches!(result, Err(ValidationError::MalformedSymbol(_))));
    }
}
