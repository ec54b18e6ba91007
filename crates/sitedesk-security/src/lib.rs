//! # SiteDesk Security
//!
//! JWT claims issuing/validation and password hashing.

pub mod jwt;
pub mod password;
