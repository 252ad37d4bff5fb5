//! Validation utilities.

use crate::{CatalogError, FieldError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `CatalogError` on failure.
    fn validate_request(&self) -> Result<(), CatalogError> {
        self.validate().map_err(validation_errors_to_catalog_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to `CatalogError`.
#[must_use]
pub fn validation_errors_to_catalog_error(errors: ValidationErrors) -> CatalogError {
    let field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |m| m.to_string()),
                code: error.code.to_string(),
            })
        })
        .collect();

    let message = field_errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ");

    CatalogError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use rust_decimal::Decimal;
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates that a price is positive with at most two decimal places.
    pub fn valid_price(price: &Decimal) -> Result<(), ValidationError> {
        if *price <= Decimal::ZERO {
            return Err(ValidationError::new("price_not_positive"));
        }
        if price.scale() > 2 {
            return Err(ValidationError::new("price_too_many_decimals"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::rules::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_not_blank() {
        assert!(not_blank("product").is_ok());
        assert!(not_blank("  ").is_err());
        assert!(not_blank("").is_err());
    }

    #[test]
    fn test_valid_price_accepts_two_decimals() {
        assert!(valid_price(&dec!(19.99)).is_ok());
        assert!(valid_price(&dec!(5)).is_ok());
    }

    #[test]
    fn test_valid_price_rejects_non_positive() {
        assert!(valid_price(&dec!(0)).is_err());
        assert!(valid_price(&dec!(-1.50)).is_err());
    }

    #[test]
    fn test_valid_price_rejects_sub_cent_precision() {
        assert!(valid_price(&dec!(9.999)).is_err());
    }
}
