//! # Application State
//!
//! Shared state for the Axum application: the in-memory store, the gateway
//! client, and server configuration. The store is constructed once at
//! process start and handed to every handler through this state, so tests
//! can build isolated instances.

use epay_core::{Customer, Invoice, InvoiceStatus, Store};
use epay_gateway::GatewayClient;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// In-memory record store
    pub store: Arc<Store>,
    /// ePay gateway client
    pub gateway: Arc<GatewayClient>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState from environment configuration
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();
        let gateway = GatewayClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize gateway client: {}", e))?;

        Ok(Self {
            store: Arc::new(Store::new()),
            gateway: Arc::new(gateway),
            config,
        })
    }

    /// Create state from explicit parts (for testing)
    pub fn with_parts(store: Store, gateway: GatewayClient) -> Self {
        Self {
            store: Arc::new(store),
            gateway: Arc::new(gateway),
            config: AppConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                environment: "test".to_string(),
            },
        }
    }
}

/// Seed the store with demo records for manual testing of the flow.
/// Called by the binary only; tests start from an empty store.
pub fn seed_demo_data(store: &Store) {
    store.insert_customer(Customer {
        id: "cust-1".to_string(),
        name: "Alice Johnson".to_string(),
        email: "alice@example.com".to_string(),
        phone: Some("555-1234".to_string()),
        token_id: None,
    });
    store.insert_invoice(Invoice {
        id: "inv-1".to_string(),
        customer_id: "cust-1".to_string(),
        invoice_number: "INV-1001".to_string(),
        amount: 75.50,
        status: InvoiceStatus::Outstanding,
        transaction_id: None,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_defaults() {
        // Clear env vars for test
        std::env::remove_var("HOST");
        std::env::remove_var("PORT");

        let config = AppConfig::from_env();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "test".to_string(),
        };

        let addr = config.socket_addr();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_seed_demo_data() {
        let store = Store::new();
        seed_demo_data(&store);

        let customer = store.get_customer("cust-1").unwrap();
        assert_eq!(customer.name, "Alice Johnson");

        let invoice = store.get_invoice("inv-1").unwrap();
        assert_eq!(invoice.amount, 75.50);
        assert_eq!(invoice.status, InvoiceStatus::Outstanding);
    }
}
