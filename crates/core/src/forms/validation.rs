use super::forms_model::NumericField;
use crate::clients::ClientDetails;
use crate::errors::ValidationError;
use crate::money::Amount;

/// Applies the create-form rules to details that are already typed, as held
/// by the edit flow.
pub fn validate_details(details: &ClientDetails) -> Result<(), ValidationError> {
    if details.full_name.trim().is_empty() {
        return Err(ValidationError::MissingFullName);
    }
    for field in NumericField::ALL {
        if let Amount::Malformed(_) = field.amount(details) {
            return Err(ValidationError::NotANumber(field.as_str().to_string()));
        }
    }
    Ok(())
}
