//! Draft state for the create flows and shallow validation before submit.

mod forms_model;
mod validation;

pub use forms_model::{ApplicationForm, ClientDetailsForm, NumericField};
pub use validation::validate_details;
