//! HTTP handlers, one module per entity family.

pub mod auth;
pub mod clients;
pub mod health;
pub mod inventory;
pub mod quotations;
pub mod sites;
pub mod tenants;
