//! Small helpers shared across stages

/// Split a canonical "BASE/QUOTE" symbol into its two assets
pub fn split_symbol(symbol: &str) -> Option<(&str, &str)> {
    let (base, quote) = symbol.split_once('/')?;
    if base.is_empty() || quote.is_empty() {
        return None;
    }
    Some((base, quote))
}

/// Round a percentage to 4 decimal places
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Normalize a transfer-network identifier for comparison
pub fn normalize_network(name: &str) -> String {
    name.trim().to_uppercase()
}
