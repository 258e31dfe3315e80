//! Money and numeric field handling.

mod amount;
mod format;

pub use amount::Amount;
pub use format::format_usd;
