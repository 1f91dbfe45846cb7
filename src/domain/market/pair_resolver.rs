//! Groups per-exchange pair listings into shared symbols

use std::collections::{HashMap, HashSet};
use tracing::info;

use crate::shared::types::{SharedPairGroup, StandardPair};

/// Merge per-exchange listings into groups keyed by canonical symbol.
///
/// Pairs whose quote asset is outside a non-empty `quote_assets_filter` are
/// dropped before grouping. Only symbols listed on two or more distinct
/// exchanges survive. Group order is first-seen symbol order, so the output
/// is deterministic for a stable exchange ordering. Pure function.
pub fn resolve_shared_pairs(
    listings: Vec<(String, Vec<StandardPair>)>,
    quote_assets_filter: &HashSet<String>,
) -> Vec<SharedPairGroup> {
    let mut order: Vec<String> = Vec::new();
    let mut by_symbol: HashMap<String, Vec<(String, StandardPair)>> = HashMap::new();

    for (exchange_id, pairs) in listings {
        for pair in pairs {
            if !quote_assets_filter.is_empty() && !quote_assets_filter.contains(&pair.quote) {
                continue;
            }
            let entry = by_symbol.entry(pair.symbol.clone()).or_insert_with(|| {
                order.push(pair.symbol.clone());
                Vec::new()
            });
            entry.push((exchange_id.clone(), pair));
        }
    }

    let groups: Vec<SharedPairGroup> = order
        .into_iter()
        .filter_map(|symbol| {
            let members = by_symbol.remove(&symbol)?;
            let distinct: HashSet<&str> =
                members.iter().map(|(id, _)| id.as_str()).collect();
            if distinct.len() < 2 {
                return None;
            }
            Some(SharedPairGroup { symbol, members })
        })
        .collect();

    info!("🎯 Resolved {} shared symbols", groups.len());
    groups
}
