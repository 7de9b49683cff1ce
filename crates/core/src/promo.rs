//! Promotional codes
//!
//! A promo code is a reusable flat-amount coupon: validated read-only on
//! every submission and never consumed. Lookup is case-insensitive on the
//! trimmed code; storage does the lookup, this module does the decision.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A promotional code as read from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoCode {
    /// The code as entered by an administrator.
    pub code: String,

    /// Flat discount in cents.
    pub discount: u64,

    /// Deactivated codes stop validating but keep their history.
    pub active: bool,
}

/// Why a promo code did not validate.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromoError {
    /// No code matches the entered text.
    #[error("promo code not found")]
    NotFound,

    /// The code exists but has been deactivated.
    #[error("promo code is no longer active")]
    Inactive,
}

/// Canonical form used for lookup and uniqueness: trimmed and lowercased.
pub fn normalize(code: &str) -> String {
    code.trim().to_lowercase()
}

/// Decide whether a looked-up code grants its discount.
///
/// `found` is the storage lookup result for the normalized code.
pub fn validate(found: Option<&PromoCode>) -> Result<u64, PromoError> {
    match found {
        None => Err(PromoError::NotFound),
        Some(code) if !code.active => Err(PromoError::Inactive),
        Some(code) => Ok(code.discount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize("  SPRING24 \n"), "spring24");
        assert_eq!(normalize("Vente-2026"), "vente-2026");
    }

    #[test]
    fn active_code_grants_its_discount() {
        let code = PromoCode {
            code: "spring24".to_string(),
            discount: 500,
            active: true,
        };

        assert_eq!(validate(Some(&code)), Ok(500));
    }

    #[test]
    fn missing_code_is_not_found() {
        assert_eq!(validate(None), Err(PromoError::NotFound));
    }

    #[test]
    fn deactivated_code_is_inactive() {
        let code = PromoCode {
            code: "spring24".to_string(),
            discount: 500,
            active: false,
        };

        assert_eq!(validate(Some(&code)), Err(PromoError::Inactive));
    }

    #[test]
    fn validation_has_no_side_effects() {
        // A coupon, not a voucher: validating twice yields the same result.
        let code = PromoCode {
            code: "spring24".to_string(),
            discount: 250,
            active: true,
        };

        assert_eq!(validate(Some(&code)), Ok(250));
        assert_eq!(validate(Some(&code)), Ok(250));
    }
}
