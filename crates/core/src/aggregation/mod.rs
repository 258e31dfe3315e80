//! Search, year scoping and rebate totals over an in-memory record list.

mod aggregation_model;
mod filters;
mod summary;

pub use aggregation_model::{AmountPolicy, DeltaStatus, RebateEntry, RebateSummary, YearFilter};
pub use filters::{available_years, filter_by_query, filter_by_year};
pub use summary::{summarize, ListView};
