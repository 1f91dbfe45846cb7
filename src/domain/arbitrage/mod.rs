//! Spread detection between exchanges

pub mod spread_detector;

pub use spread_detector::detect_spreads;
