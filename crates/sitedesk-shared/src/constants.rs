//! Application-wide constants

/// Access token lifetime: 8 hours, in seconds.
pub const DEFAULT_TOKEN_EXPIRY: i64 = 28_800;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;
/// Quotation number prefix, e.g. QT-2026-0001.
pub const QUOTATION_NUMBER_PREFIX: &str = "QT";
