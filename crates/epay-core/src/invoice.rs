//! # Invoice Types
//!
//! Local invoice records. An invoice references a customer (not enforced),
//! carries a pseudo-random invoice number (not guaranteed unique), and moves
//! through a single status transition: Outstanding to Paid.

use crate::customer::generate_id;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Invoice payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Outstanding,
    Paid,
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Outstanding
    }
}

/// An invoice record held in the in-memory store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Unique invoice identifier (generated, `inv-` prefixed)
    pub id: String,

    /// Customer this invoice belongs to. Referential integrity is not
    /// enforced at creation time.
    pub customer_id: String,

    /// Human-facing invoice number (`INV-2000`..`INV-9999`, not unique)
    pub invoice_number: String,

    /// Invoice amount in major currency units
    pub amount: f64,

    /// Payment status
    pub status: InvoiceStatus,

    /// Transaction that settled this invoice, if any.
    /// Serialized as an explicit `null` until set.
    pub transaction_id: Option<String>,
}

impl Invoice {
    /// Create a new outstanding invoice with generated id and invoice number
    pub fn new(customer_id: impl Into<String>, amount: f64) -> Self {
        let number = rand::thread_rng().gen_range(2000..=9999);
        Self {
            id: generate_id("inv"),
            customer_id: customer_id.into(),
            invoice_number: format!("INV-{}", number),
            amount,
            status: InvoiceStatus::Outstanding,
            transaction_id: None,
        }
    }

    /// Mark this invoice paid, stamping the settling transaction id.
    /// The transaction id may be `None`; the status still moves to Paid.
    pub fn mark_paid(&mut self, transaction_id: Option<String>) {
        self.status = InvoiceStatus::Paid;
        self.transaction_id = transaction_id;
    }
}
