//! Spreadscan - Cross-exchange arbitrage scanner
//! Built with Domain-Driven Design principles

pub mod application;
pub mod config;
pub mod domain;
pub mod exchanges;
pub mod infrastructure;
pub mod shared;

// Re-export main types for convenience
pub use application::ScanPipeline;
pub use domain::arbitrage::detect_spreads;
pub use domain::market::{enrich_group, resolve_shared_pairs};
pub use domain::transfer::validate_opportunity;
pub use exchanges::ExchangeAdapter;
pub use infrastructure::{JsonStore, OpportunityCategory};
