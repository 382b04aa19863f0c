//! # epay-core
//!
//! Core types for the epay backend.
//!
//! This crate provides:
//! - `Customer`, `Invoice`, and `Transaction` domain records
//! - `Store` for process-lifetime in-memory state
//! - `ApiError` for typed error handling with HTTP status mapping
//!
//! ## Example
//!
//! ```rust
//! use epay_core::{Customer, Invoice, Store};
//!
//! let store = Store::new();
//! let customer = store.insert_customer(Customer::new("Alice", "alice@example.com", None));
//! let invoice = store.insert_invoice(Invoice::new(&customer.id, 75.50));
//!
//! assert_eq!(store.invoices_for_customer(&customer.id).len(), 1);
//! store.mark_invoice_paid(&invoice.id, Some("txn-1".to_string()));
//! ```

pub mod customer;
pub mod error;
pub mod invoice;
pub mod store;
pub mod transaction;

// Re-exports for convenience
pub use customer::Customer;
pub use error::{ApiError, ApiResult};
pub use invoice::{Invoice, InvoiceStatus};
pub use store::Store;
pub use transaction::Transaction;
