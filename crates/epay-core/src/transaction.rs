//! # Transaction Types
//!
//! Local cache records for gateway transactions. A transaction is created
//! on successful submission and echoes the payload that was forwarded
//! upstream. Records fetched from a remote lookup are cached verbatim as
//! raw JSON instead, so both shapes live in the same cache.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A transaction record created by a successful gateway submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Gateway transaction identifier
    pub id: String,

    /// Gateway public identifier, if returned
    #[serde(rename = "publicId")]
    pub public_id: Option<String>,

    /// Gateway-reported status (defaults to `Completed` when omitted)
    pub status: String,

    /// Echo of the submitted payload, minus the local `invoiceId` field
    pub details: Value,

    /// Local invoice this transaction settled, for traceability
    pub local_invoice_id: Option<String>,
}
