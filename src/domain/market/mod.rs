//! Market resolution and quote enrichment

pub mod pair_resolver;
pub mod quote_enricher;

pub use pair_resolver::resolve_shared_pairs;
pub use quote_enricher::enrich_group;
