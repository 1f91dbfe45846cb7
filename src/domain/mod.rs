//! Domain layer: resolution, enrichment, detection, validation

pub mod arbitrage;
pub mod market;
pub mod transfer;
