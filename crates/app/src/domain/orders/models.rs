//! Order models

use barrique::{
    availability::SlotAvailability,
    cart::CartLine,
    codes,
    payment::PaymentMethod,
    pricing::{Fulfilment, Totals},
    status::OrderStatus,
};
use jiff::Timestamp;
use uuid::Uuid;

use crate::domain::orders::submission::PricedCart;

/// Customer contact details as entered at submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// An order as submitted by the client: untrusted until validated, priced
/// and availability-checked server-side.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSubmission {
    pub customer: Customer,
    pub fulfilment: Fulfilment,
    pub slot: Option<Uuid>,
    pub payment: PaymentMethod,
    pub lines: Vec<CartLine>,
    pub promo_code: Option<String>,
}

/// A persisted order line. The unit price is the price at order time; later
/// catalogue changes never touch it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub uuid: Uuid,
    pub product: Uuid,
    pub quantity: u32,
    pub unit_price: u64,
}

/// A line priced but not yet persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderLine {
    pub product: Uuid,
    pub quantity: u32,
    pub unit_price: u64,
}

/// A persisted order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub uuid: Uuid,
    pub event: Uuid,
    /// Monotonic number behind the code and the payment reference.
    pub number: u64,
    /// Human-readable code, read out at the pickup table.
    pub code: String,
    pub customer: Customer,
    pub fulfilment: Fulfilment,
    pub slot: Option<Uuid>,
    pub payment: PaymentMethod,
    /// Structured bank-transfer communication.
    pub payment_reference: String,
    pub totals: Totals,
    pub status: OrderStatus,
    pub lines: Vec<OrderLine>,
    pub created_at: Timestamp,
}

impl Order {
    /// Assemble the order record for a validated, priced submission.
    ///
    /// Identifiers derive from the monotonic `number`; the initial status is
    /// always [`OrderStatus::Pending`].
    pub(crate) fn assemble(
        event: Uuid,
        number: u64,
        submission: OrderSubmission,
        priced: PricedCart,
        created_at: Timestamp,
    ) -> Self {
        let lines = priced
            .lines
            .into_iter()
            .map(|line| OrderLine {
                uuid: Uuid::now_v7(),
                product: line.product,
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
            .collect();

        Self {
            uuid: Uuid::now_v7(),
            event,
            number,
            code: codes::order_code(number),
            customer: submission.customer,
            fulfilment: submission.fulfilment,
            slot: submission.slot,
            payment: submission.payment,
            payment_reference: codes::payment_reference(number),
            totals: priced.totals,
            status: OrderStatus::Pending,
            lines,
            created_at,
        }
    }
}

/// A slot row locked for submission, with its current usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotOccupancy {
    pub uuid: Uuid,
    pub capacity: u32,
    /// Non-cancelled orders already referencing the slot.
    pub used: i64,
}

impl SlotOccupancy {
    /// The slot's state for the availability decision.
    pub fn availability(&self) -> SlotAvailability {
        SlotAvailability {
            slot: self.uuid,
            remaining: i64::from(self.capacity) - self.used,
        }
    }
}
