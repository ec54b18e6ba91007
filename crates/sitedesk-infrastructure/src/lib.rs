//! # SiteDesk Infrastructure
//!
//! PostgreSQL implementations of the core repository traits.

pub mod database;
