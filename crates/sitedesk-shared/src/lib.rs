//! # SiteDesk Shared
//!
//! Configuration, telemetry, common types, and the `Patch` partial-update
//! marker shared by every SiteDesk crate.

pub mod config;
pub mod constants;
pub mod patch;
pub mod telemetry;
pub mod utils;

pub use patch::Patch;
