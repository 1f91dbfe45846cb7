//! Infrastructure: persistence of scan results

pub mod store;

pub use store::{JsonStore, OpportunityCategory};
