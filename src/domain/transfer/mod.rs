//! Transfer-network executability checks

pub mod executability;

pub use executability::validate_opportunity;
