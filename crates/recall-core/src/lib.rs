//! Core data model and JSON-backed episode store for Recall.
//!
//! A knowledge base is a single JSON document holding `metadata` and an
//! ordered list of `episodes`. [`storage::JsonStore`] loads it (seeding a
//! default document on first use) and writes it back on request.

pub mod config;
pub mod error;
pub mod model;
pub mod storage;

pub use config::RecallConfig;
pub use error::CoreError;
