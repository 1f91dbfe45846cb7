//! Application layer: pipeline orchestration

pub mod scan_pipeline;

pub use scan_pipeline::ScanPipeline;
