//! # epay-api
//!
//! HTTP API layer for the epay backend.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints for customers, invoices, and gateway proxying
//! - Permissive CORS for the demo frontend
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET/POST | `/api/customers` | List / create customers |
//! | GET | `/api/customers/{id}` | Get customer |
//! | POST | `/api/customers/{id}/token` | Link token to customer |
//! | GET/POST | `/api/invoices` | List / create invoices |
//! | POST | `/api/invoices/{id}/paid` | Mark invoice paid |
//! | POST | `/api/epay/tokens` | Tokenize payment method |
//! | GET | `/api/epay/fees` | Compute mock fees |
//! | POST | `/api/epay/transactions` | Submit payment |
//! | GET | `/api/epay/transactions/{id}` | Fetch transaction status |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{seed_demo_data, AppConfig, AppState};
