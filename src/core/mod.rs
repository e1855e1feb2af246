//! Allocation engine and its collaborators
//!
//! - [`error`] - Error types
//! - [`units`] - Size tokens (`"100 KB"`) and display formatting
//! - [`model`] - Blocks, processes and run results
//! - [`allocator`] - Placement strategies and the allocation engine
//! - [`fragmentation`] - Internal/external fragmentation totals
//! - [`frames`] - Step-by-step occupancy snapshots
//! - [`report`] - Text and JSON reports
//! - [`config`] - TOML configuration

pub mod allocator;
pub mod config;
pub mod error;
pub mod fragmentation;
pub mod frames;
pub mod model;
pub mod report;
pub mod units;
