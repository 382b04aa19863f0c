//! # epay-gateway
//!
//! ePay gateway adapter for the epay backend.
//!
//! This crate provides:
//! - `GatewayConfig` — env-loaded credentials and connection knobs
//! - `GatewayClient` — authenticated HTTP calls for tokenization,
//!   transaction submission, and transaction lookup, with upstream
//!   error translation
//! - `quote_fees` — local placeholder fee estimation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use epay_gateway::{GatewayClient, GatewayConfig};
//!
//! let client = GatewayClient::from_env()?;
//!
//! let payload = GatewayClient::prepare_token_payload(&body)?;
//! let token = client.create_token(&payload).await?;
//!
//! println!("token id: {}", token.token_id);
//! ```

pub mod client;
pub mod config;
pub mod fees;

// Re-exports
pub use client::{GatewayClient, TokenCreated, TransactionCreated};
pub use config::GatewayConfig;
pub use fees::{quote_fees, FeeQuote};
