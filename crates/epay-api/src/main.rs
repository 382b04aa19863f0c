//! # ePay Backend RS
//!
//! Demo backend for customers, invoices, and ePay gateway proxying.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export EPAY_API_KEY=...
//! export EPAY_API_SECRET=...
//!
//! # Run the server
//! epay-backend
//! ```

use epay_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new()?;

    // Demo records so the flow can be exercised immediately
    epay_api::seed_demo_data(&state.store);

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Gateway base URL: {}", state.gateway.base_url());

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("ePay backend starting on http://{}", addr);

    if !is_prod {
        info!("Customers: GET http://{}/api/customers", addr);
        info!("Tokenize:  POST http://{}/api/epay/tokens", addr);
        info!("Pay:       POST http://{}/api/epay/transactions", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
