//! Order lifecycle
//!
//! `Pending → Paid → Prepared → Delivered`, with `Cancelled` reachable from
//! any non-terminal state. Only forward moves and cancellation are legal;
//! terminal states allow no transition at all. Cancelled orders stop
//! counting against stock and slot capacity.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Submitted, awaiting payment. The initial state of every order.
    Pending,

    /// Payment received (or reconciled from a bank transfer).
    Paid,

    /// Picked and packed, awaiting handover.
    Prepared,

    /// Handed over to the customer. Terminal.
    Delivered,

    /// Abandoned at any pre-terminal point. Terminal; releases stock and
    /// slot capacity.
    Cancelled,
}

/// An illegal status transition.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("cannot move an order from {from:?} to {to:?}")]
pub struct InvalidTransition {
    /// Current status.
    pub from: OrderStatus,

    /// Requested status.
    pub to: OrderStatus,
}

impl OrderStatus {
    /// Position along the forward path; `None` for `Cancelled`, which sits
    /// outside it.
    fn rank(self) -> Option<u8> {
        match self {
            Self::Pending => Some(0),
            Self::Paid => Some(1),
            Self::Prepared => Some(2),
            Self::Delivered => Some(3),
            Self::Cancelled => None,
        }
    }

    /// Whether no further transition is possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Whether an order in this status still holds its stock and slot
    /// reservation.
    pub fn counts_against_capacity(self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Whether moving to `next` is legal: any strictly forward move, or
    /// cancellation from a non-terminal state.
    pub fn can_transition_to(self, next: Self) -> bool {
        if self.is_terminal() {
            return false;
        }

        match (self.rank(), next.rank()) {
            (_, None) => true,
            (Some(from), Some(to)) => to > from,
            (None, Some(_)) => false,
        }
    }

    /// Validate and perform a transition.
    pub fn transition(self, next: Self) -> Result<Self, InvalidTransition> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(InvalidTransition {
                from: self,
                to: next,
            })
        }
    }

    /// Database/text representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Prepared => "prepared",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse the database/text representation.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            "prepared" => Some(Self::Prepared),
            "delivered" => Some(Self::Delivered),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}
