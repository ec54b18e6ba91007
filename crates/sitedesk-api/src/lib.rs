//! # SiteDesk API
//!
//! HTTP handlers, auth extractor, DTOs, and error mapping.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod router;
pub mod state;
