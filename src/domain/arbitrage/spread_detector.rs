//! Detects directional price spreads inside an enriched group

use chrono::Utc;
use tracing::info;

use crate::shared::types::{EnrichedGroup, Opportunity, TradeLeg};
use crate::shared::utils::round4;

/// Evaluate every ordered (buy, sell) exchange pair within the group.
///
/// Buys happen at the ask, sells at the bid. A candidate is emitted when the
/// spread clears `min_profit_percentage`. Both directions are checked
/// independently; pathological ask/bid data can fire twice for the same pair
/// of exchanges and is deliberately not deduplicated. O(n²) over the group,
/// with n bounded by the number of configured exchanges.
pub fn detect_spreads(enriched: &EnrichedGroup, min_profit_percentage: f64) -> Vec<Opportunity> {
    let tickers = &enriched.tickers;
    let mut opportunities = Vec::new();

    for (i, (buy_exchange, buy_ticker)) in tickers.iter().enumerate() {
        for (j, (sell_exchange, sell_ticker)) in tickers.iter().enumerate() {
            if i == j {
                continue;
            }
            if buy_ticker.ask <= 0.0 {
                continue;
            }

            let spread = (sell_ticker.bid - buy_ticker.ask) / buy_ticker.ask * 100.0;
            if spread < min_profit_percentage {
                continue;
            }

            let profit_percentage = round4(spread);
            info!(
                "💰 {}: buy {} @ {} / sell {} @ {} -> {}%",
                enriched.group.symbol,
                buy_exchange,
                buy_ticker.ask,
                sell_exchange,
                sell_ticker.bid,
                profit_percentage
            );
            opportunities.push(Opportunity {
                pair: enriched.group.symbol.clone(),
                profit_percentage,
                buy_at: TradeLeg {
                    exchange: buy_exchange.clone(),
                    price: buy_ticker.ask,
                },
                sell_at: TradeLeg {
                    exchange: sell_exchange.clone(),
                    price: sell_ticker.bid,
                },
                timestamp: Utc::now(),
                validation: None,
            });
        }
    }

    opportunities
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use crate::shared::types::{SharedPairGroup, StandardPair, StandardTicker};

    fn enriched(tickers: Vec<(&str, f64, f64)>) -> EnrichedGroup {
        let members = tickers
            .iter()
            .map(|(id, _, _)| {
                (
                    id.to_string(),
                    StandardPair::new("AAA", "USDT", id, json!({})),
                )
            })
            .collect();
        let tickers = tickers
            .into_iter()
            .map(|(id, bid, ask)| {
                (
                    id.to_string(),
                    StandardTicker {
                        exchange_id: id.to_string(),
                        price: (bid + ask) / 2.0,
                        bid,
                        ask,
                        raw: json!({}),
                    },
                )
            })
            .collect();
        EnrichedGroup {
            group: SharedPairGroup {
                symbol: "AAA/USDT".to_string(),
                members,
            },
            tickers,
        }
    }

    #[test]
    fn test_scenario_a_one_direction_fires() {
        // X: ask=100 bid=99.5, Y: ask=105 bid=103, threshold 0.5%
        let group = enriched(vec![("x", 99.5, 100.0), ("y", 103.0, 105.0)]);
        let found = detect_spreads(&group, 0.5);

        assert_eq!(found.len(), 1);
        let opp = &found[0];
        assert_eq!(opp.buy_at.exchange, "x");
        assert_eq!(opp.buy_at.price, 100.0);
        assert_eq!(opp.sell_at.exchange, "y");
        assert_eq!(opp.sell_at.price, 103.0);
        assert_eq!(opp.profit_percentage, 3.0);
        assert!(opp.sell_at.price > opp.buy_at.price);
        assert!(opp.validation.is_none());
    }

    #[test]
    fn test_scenario_b_threshold_filters_all() {
        let group = enriched(vec![("x", 99.5, 100.0), ("y", 103.0, 105.0)]);
        assert!(detect_spreads(&group, 5.0).is_empty());
    }

    #[test]
    fn test_emitted_profit_never_below_threshold() {
        let group = enriched(vec![
            ("x", 99.5, 100.0),
            ("y", 103.0, 105.0),
            ("z", 101.0, 101.5),
        ]);
        for opp in detect_spreads(&group, 1.0) {
            assert!(opp.profit_percentage >= 1.0);
            assert!(opp.sell_at.price > opp.buy_at.price);
        }
    }

    #[test]
    fn test_non_positive_ask_is_skipped() {
        let group = enriched(vec![("x", 99.5, 0.0), ("y", 103.0, 105.0)]);
        let found = detect_spreads(&group, 0.5);
        assert!(!found.iter().any(|o| o.buy_at.exchange == "x"));
    }

    #[test]
    fn test_both_directions_can_fire_on_crossed_books() {
        // Crossed books: each venue bids above the other's ask
        let group = enriched(vec![("x", 110.0, 100.0), ("y", 111.0, 101.0)]);
        let found = detect_spreads(&group, 0.5);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].buy_at.exchange, "x");
        assert_eq!(found[1].buy_at.exchange, "y");
    }

    #[test]
    fn test_profit_rounded_to_four_decimals() {
        // (100.333 - 100) / 100 * 100 = 0.333000...
        let group = enriched(vec![("x", 99.0, 100.0), ("y", 100.333333, 101.0)]);
        let found = detect_spreads(&group, 0.3);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].profit_percentage, 0.3333);
    }
}
