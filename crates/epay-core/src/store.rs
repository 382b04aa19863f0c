//! # In-Memory Store
//!
//! Process-lifetime holder of all mutable application records: customers,
//! invoices, the token audit cache, and the transaction cache. Constructed
//! once at startup and passed into every handler as a shared handle; there
//! is no persistence and contents reset on restart.
//!
//! Writes use coarse `RwLock`s with no transactional discipline. Concurrent
//! writes to the same record are last-write-wins, which is acceptable for a
//! demo backend.

use crate::customer::Customer;
use crate::invoice::Invoice;
use crate::transaction::Transaction;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

/// Shared in-memory state for the process lifetime
#[derive(Debug, Default)]
pub struct Store {
    /// Customers in insertion order
    customers: RwLock<Vec<Customer>>,
    /// Invoices in insertion order
    invoices: RwLock<Vec<Invoice>>,
    /// Token audit cache: tokenId -> raw tokenization request payload
    tokens: RwLock<HashMap<String, Value>>,
    /// Transaction cache: transaction id -> record (local or verbatim remote)
    transactions: RwLock<HashMap<String, Value>>,
}

impl Store {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------
    // Customers
    // -------------------------------------------------------------------

    /// All customers, in insertion order
    pub fn list_customers(&self) -> Vec<Customer> {
        self.customers.read().unwrap().clone()
    }

    /// Insert a customer and return a copy of the stored record
    pub fn insert_customer(&self, customer: Customer) -> Customer {
        self.customers.write().unwrap().push(customer.clone());
        customer
    }

    /// Look up a customer by id
    pub fn get_customer(&self, id: &str) -> Option<Customer> {
        self.customers
            .read()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    /// Whether a customer with this id exists
    pub fn has_customer(&self, id: &str) -> bool {
        self.customers.read().unwrap().iter().any(|c| c.id == id)
    }

    /// Link a gateway token to a customer, overwriting any previous link.
    /// Returns the updated record, or `None` if the customer is unknown.
    pub fn set_customer_token(&self, id: &str, token_id: String) -> Option<Customer> {
        let mut customers = self.customers.write().unwrap();
        let customer = customers.iter_mut().find(|c| c.id == id)?;
        customer.token_id = Some(token_id);
        Some(customer.clone())
    }

    // -------------------------------------------------------------------
    // Invoices
    // -------------------------------------------------------------------

    /// All invoices, in insertion order
    pub fn list_invoices(&self) -> Vec<Invoice> {
        self.invoices.read().unwrap().clone()
    }

    /// Invoices belonging to the given customer
    pub fn invoices_for_customer(&self, customer_id: &str) -> Vec<Invoice> {
        self.invoices
            .read()
            .unwrap()
            .iter()
            .filter(|inv| inv.customer_id == customer_id)
            .cloned()
            .collect()
    }

    /// Insert an invoice and return a copy of the stored record
    pub fn insert_invoice(&self, invoice: Invoice) -> Invoice {
        self.invoices.write().unwrap().push(invoice.clone());
        invoice
    }

    /// Look up an invoice by id
    pub fn get_invoice(&self, id: &str) -> Option<Invoice> {
        self.invoices
            .read()
            .unwrap()
            .iter()
            .find(|inv| inv.id == id)
            .cloned()
    }

    /// Mark an invoice paid, stamping the settling transaction id.
    /// Returns the updated record, or `None` if the invoice is unknown.
    pub fn mark_invoice_paid(
        &self,
        id: &str,
        transaction_id: Option<String>,
    ) -> Option<Invoice> {
        let mut invoices = self.invoices.write().unwrap();
        let invoice = invoices.iter_mut().find(|inv| inv.id == id)?;
        invoice.mark_paid(transaction_id);
        Some(invoice.clone())
    }

    // -------------------------------------------------------------------
    // Token and transaction caches
    // -------------------------------------------------------------------

    /// Cache the raw tokenization request payload under its gateway token id.
    /// Kept for audit only; nothing reads it back operationally.
    pub fn cache_token(&self, token_id: String, payload: Value) {
        self.tokens.write().unwrap().insert(token_id, payload);
    }

    /// Number of cached token payloads
    pub fn token_count(&self) -> usize {
        self.tokens.read().unwrap().len()
    }

    /// Cache a transaction record created by a successful submission
    pub fn cache_transaction(&self, txn: &Transaction) {
        let value = serde_json::to_value(txn).unwrap_or(Value::Null);
        self.transactions.write().unwrap().insert(txn.id.clone(), value);
    }

    /// Cache a verbatim remote transaction record under the given id
    pub fn cache_remote_transaction(&self, id: String, record: Value) {
        self.transactions.write().unwrap().insert(id, record);
    }

    /// Look up a cached transaction record
    pub fn get_transaction(&self, id: &str) -> Option<Value> {
        self.transactions.read().unwrap().get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::InvoiceStatus;
    use serde_json::json;

    #[test]
    fn test_customers_keep_insertion_order() {
        let store = Store::new();
        store.insert_customer(Customer::new("Alice", "alice@example.com", None));
        store.insert_customer(Customer::new("Bob", "bob@example.com", None));
        store.insert_customer(Customer::new("Carol", "carol@example.com", None));

        let names: Vec<_> = store
            .list_customers()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_set_customer_token_overwrites() {
        let store = Store::new();
        let customer = store.insert_customer(Customer::new("Alice", "alice@example.com", None));

        let updated = store
            .set_customer_token(&customer.id, "tok-first".into())
            .unwrap();
        assert_eq!(updated.token_id.as_deref(), Some("tok-first"));

        let updated = store
            .set_customer_token(&customer.id, "tok-second".into())
            .unwrap();
        assert_eq!(updated.token_id.as_deref(), Some("tok-second"));

        assert!(store.set_customer_token("cust-missing", "tok".into()).is_none());
    }

    #[test]
    fn test_invoice_filter_by_customer() {
        let store = Store::new();
        store.insert_invoice(Invoice::new("cust-1", 10.0));
        store.insert_invoice(Invoice::new("cust-2", 20.0));
        store.insert_invoice(Invoice::new("cust-1", 30.0));

        let filtered = store.invoices_for_customer("cust-1");
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|inv| inv.customer_id == "cust-1"));
        assert_eq!(store.list_invoices().len(), 3);
    }

    #[test]
    fn test_mark_invoice_paid() {
        let store = Store::new();
        let invoice = store.insert_invoice(Invoice::new("cust-1", 75.50));

        let updated = store
            .mark_invoice_paid(&invoice.id, Some("txn-1".into()))
            .unwrap();
        assert_eq!(updated.status, InvoiceStatus::Paid);
        assert_eq!(updated.transaction_id.as_deref(), Some("txn-1"));

        assert!(store.mark_invoice_paid("inv-missing", None).is_none());
    }

    #[test]
    fn test_token_cache_is_audit_only() {
        let store = Store::new();
        store.cache_token("tok-1".into(), json!({"payerName": "Alice"}));
        store.cache_token("tok-1".into(), json!({"payerName": "Alice J."}));
        store.cache_token("tok-2".into(), json!({"payerName": "Bob"}));
        assert_eq!(store.token_count(), 2);
    }

    #[test]
    fn test_transaction_cache_roundtrip() {
        let store = Store::new();
        let txn = Transaction {
            id: "txn-1".into(),
            public_id: Some("pub-1".into()),
            status: "Completed".into(),
            details: json!({"amount": 10.0}),
            local_invoice_id: None,
        };
        store.cache_transaction(&txn);

        let cached = store.get_transaction("txn-1").unwrap();
        assert_eq!(cached.get("publicId").unwrap(), "pub-1");

        store.cache_remote_transaction("txn-2".into(), json!({"id": "txn-2", "status": "Pending"}));
        let remote = store.get_transaction("txn-2").unwrap();
        assert_eq!(remote.get("status").unwrap(), "Pending");

        assert!(store.get_transaction("txn-3").is_none());
    }
}
