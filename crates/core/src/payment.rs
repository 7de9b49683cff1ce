//! Payment methods
//!
//! The engine only *records* how the customer intends to pay; no money
//! moves here. Bank transfers are reconciled by hand against the payment
//! reference generated in [`crate::codes`].

use serde::{Deserialize, Serialize};

/// Accepted payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Bank transfer, reconciled via the structured payment reference.
    BankTransfer,

    /// Cash or card at pickup / on site.
    OnSite,
}

impl PaymentMethod {
    /// Database/text representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BankTransfer => "bank_transfer",
            Self::OnSite => "on_site",
        }
    }

    /// Parse the database/text representation.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "bank_transfer" => Some(Self::BankTransfer),
            "on_site" => Some(Self::OnSite),
            _ => None,
        }
    }
}
