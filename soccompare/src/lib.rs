//! Data plumbing around the scoring core: configuration, source retrieval, the record
//! cache, the catalog, and export of comparison results.

pub mod cache;
pub mod catalog;
pub mod common;
pub mod config;
pub mod export;
pub mod sources;

pub use soccompare_core as scoring;
