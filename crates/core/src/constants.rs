/// Storage key under which the signed-in user payload is kept.
pub const SESSION_STORAGE_KEY: &str = "user";

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;
