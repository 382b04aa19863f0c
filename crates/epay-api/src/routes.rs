//! # Routes
//!
//! Axum router configuration for the epay backend.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Local CRUD:
///   - GET  /api/customers - List customers
///   - POST /api/customers - Create customer
///   - GET  /api/customers/{id} - Get customer
///   - POST /api/customers/{id}/token - Link gateway token to customer
///   - GET  /api/invoices?customerId= - List invoices, optionally filtered
///   - POST /api/invoices - Create invoice
///   - POST /api/invoices/{id}/paid - Mark invoice paid
///
/// - Gateway:
///   - POST /api/epay/tokens - Tokenize payment method
///   - GET  /api/epay/fees?amount= - Compute mock fees
///   - POST /api/epay/transactions - Submit payment
///   - GET  /api/epay/transactions/{id} - Fetch transaction status
///
/// - Status:
///   - GET / - Running status
///   - GET /health - Health check
pub fn create_router(state: AppState) -> Router {
    // Permissive CORS for the demo frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let customer_routes = Router::new()
        .route(
            "/customers",
            get(handlers::list_customers).post(handlers::create_customer),
        )
        .route("/customers/{customer_id}", get(handlers::get_customer))
        .route(
            "/customers/{customer_id}/token",
            post(handlers::link_customer_token),
        );

    let invoice_routes = Router::new()
        .route(
            "/invoices",
            get(handlers::list_invoices).post(handlers::create_invoice),
        )
        .route(
            "/invoices/{invoice_id}/paid",
            post(handlers::mark_invoice_paid),
        );

    let gateway_routes = Router::new()
        .route("/epay/tokens", post(handlers::create_token))
        .route("/epay/fees", get(handlers::get_fees))
        .route("/epay/transactions", post(handlers::post_transaction))
        .route(
            "/epay/transactions/{transaction_id}",
            get(handlers::get_transaction),
        );

    let api_routes = Router::new()
        .merge(customer_routes)
        .merge(invoice_routes)
        .merge(gateway_routes);

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .nest("/api", api_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
