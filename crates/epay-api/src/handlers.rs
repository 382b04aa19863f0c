//! # Request Handlers
//!
//! Axum request handlers for the epay backend: local customer/invoice CRUD
//! plus the gateway-facing tokenization, fee, and transaction endpoints.
//! Validation fails fast before any external call; gateway failures arrive
//! here already mapped into the shared error taxonomy.

use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use epay_core::{ApiError, Customer, Invoice, Transaction};
use epay_gateway::{quote_fees, GatewayClient};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::{info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create customer request. Fields are optional so presence checks can
/// produce the backend's own 400 message instead of a deserialization error.
#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Link token request
#[derive(Debug, Deserialize)]
pub struct LinkTokenRequest {
    #[serde(default, rename = "tokenId")]
    pub token_id: Option<String>,
}

/// Invoice list query
#[derive(Debug, Deserialize)]
pub struct InvoiceListQuery {
    #[serde(default, rename = "customerId")]
    pub customer_id: Option<String>,
}

/// Mark-paid request; the transaction id may be absent or null
#[derive(Debug, Deserialize)]
pub struct MarkPaidRequest {
    #[serde(default, rename = "transactionId")]
    pub transaction_id: Option<String>,
}

/// Error response body: `{"error": "<message>"}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Wrapper so handlers can return `ApiError` with `?`
#[derive(Debug)]
pub struct AppError(pub ApiError);

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

// =============================================================================
// Status Handlers
// =============================================================================

/// Root status check
pub async fn index() -> impl IntoResponse {
    Json(json!({
        "status": "API is running",
        "message": "Access API endpoints via /api/..."
    }))
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "epay-backend",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// =============================================================================
// Customer Handlers
// =============================================================================

/// List all customers in insertion order
pub async fn list_customers(State(state): State<AppState>) -> Json<Vec<Customer>> {
    Json(state.store.list_customers())
}

/// Create a customer; requires name and email
pub async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<Response, AppError> {
    let (Some(name), Some(email)) = (request.name, request.email) else {
        return Err(ApiError::Validation(
            "Missing required fields: name or email".to_string(),
        )
        .into());
    };

    let customer = state
        .store
        .insert_customer(Customer::new(name, email, request.phone));

    info!("Created customer: id={}", customer.id);

    let location = format!("/api/customers/{}", customer.id);
    Ok(created_with_location(
        serde_json::to_value(&customer).unwrap_or(Value::Null),
        Some(location),
    ))
}

/// Fetch a single customer
pub async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<Json<Customer>, AppError> {
    let customer = state
        .store
        .get_customer(&customer_id)
        .ok_or_else(customer_not_found)?;
    Ok(Json(customer))
}

/// Link a gateway token (obtained via POST /api/epay/tokens) to a customer.
/// Idempotent: a repeated link overwrites the previous token.
pub async fn link_customer_token(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    Json(request): Json<LinkTokenRequest>,
) -> Result<Json<Value>, AppError> {
    if !state.store.has_customer(&customer_id) {
        return Err(customer_not_found().into());
    }

    let token_id = request
        .token_id
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            ApiError::Validation("Missing 'tokenId' in request body.".to_string())
        })?;

    let customer = state
        .store
        .set_customer_token(&customer_id, token_id)
        .ok_or_else(customer_not_found)?;

    info!("Linked token to customer: id={}", customer.id);

    Ok(Json(json!({
        "message": "Token successfully linked to customer.",
        "customer": customer
    })))
}

// =============================================================================
// Invoice Handlers
// =============================================================================

/// List invoices, optionally filtered by customer.
///
/// The filter only applies when the customerId matches a known customer;
/// otherwise the full list is returned. This mirrors the legacy backend and
/// is a known quirk: an unknown customerId arguably should return an empty
/// list instead.
pub async fn list_invoices(
    State(state): State<AppState>,
    Query(query): Query<InvoiceListQuery>,
) -> Json<Vec<Invoice>> {
    if let Some(customer_id) = query.customer_id.as_deref() {
        if !customer_id.is_empty() && state.store.has_customer(customer_id) {
            return Json(state.store.invoices_for_customer(customer_id));
        }
    }
    Json(state.store.list_invoices())
}

/// Create an invoice; requires customerId and amount
pub async fn create_invoice(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let (Some(customer_id), Some(raw_amount)) =
        (body.get("customerId").and_then(Value::as_str), body.get("amount"))
    else {
        return Err(ApiError::Validation(
            "Missing required fields: customerId or amount".to_string(),
        )
        .into());
    };

    let amount = coerce_amount(raw_amount)
        .ok_or_else(|| ApiError::Validation("Invalid amount parameter.".to_string()))?;

    let invoice = state.store.insert_invoice(Invoice::new(customer_id, amount));

    info!(
        "Created invoice: id={}, number={}",
        invoice.id, invoice.invoice_number
    );

    Ok((StatusCode::CREATED, Json(invoice)).into_response())
}

/// Mark an invoice paid, storing the transaction id verbatim (may be null)
pub async fn mark_invoice_paid(
    State(state): State<AppState>,
    Path(invoice_id): Path<String>,
    Json(request): Json<MarkPaidRequest>,
) -> Result<Json<Invoice>, AppError> {
    let invoice = state
        .store
        .mark_invoice_paid(&invoice_id, request.transaction_id)
        .ok_or_else(|| ApiError::NotFound("Invoice not found".to_string()))?;

    info!("Marked invoice paid: id={}", invoice.id);

    Ok(Json(invoice))
}

// =============================================================================
// Gateway Handlers
// =============================================================================

/// Tokenize a payment method via the gateway
#[instrument(skip(state, body))]
pub async fn create_token(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let payload = GatewayClient::prepare_token_payload(&body)?;
    let created = state.gateway.create_token(&payload).await?;

    // Cache the original (unshaped) request payload for audit
    state.store.cache_token(created.token_id.clone(), body);

    Ok(created_with_location(
        json!({
            "tokenId": created.token_id,
            "message": "Token created successfully."
        }),
        created.location,
    ))
}

/// Compute mock payer fees for an amount (no gateway call)
pub async fn get_fees(
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, AppError> {
    let quote = quote_fees(params.get("amount").map(String::as_str))?;
    Ok(Json(serde_json::to_value(&quote).unwrap_or(Value::Null)))
}

/// Submit a payment transaction via the gateway, reconciling local invoice
/// state when an invoiceId was supplied
#[instrument(skip(state, body))]
pub async fn post_transaction(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Response, AppError> {
    let (payload, invoice_id) = GatewayClient::prepare_transaction_payload(&body)?;
    let created = state.gateway.submit_transaction(&payload).await?;

    let local_invoice_id = invoice_id
        .as_ref()
        .and_then(Value::as_str)
        .map(String::from);

    let transaction = Transaction {
        id: created.id.clone(),
        public_id: created.public_id.clone(),
        status: created.status,
        details: payload,
        local_invoice_id: local_invoice_id.clone(),
    };
    state.store.cache_transaction(&transaction);

    // Sole point where local and remote state reconcile: a known invoice
    // gets marked Paid and stamped with the gateway transaction id.
    if let Some(ref inv_id) = local_invoice_id {
        if state.store.mark_invoice_paid(inv_id, Some(created.id.clone())).is_some() {
            info!("Invoice marked paid via transaction: invoice={}, txn={}", inv_id, created.id);
        }
    }

    // The flag reports whether an invoiceId was supplied, not whether a
    // matching invoice was actually updated (legacy behavior).
    let invoice_status_updated = invoice_id.is_some();

    Ok(created_with_location(
        json!({
            "id": created.id,
            "publicId": created.public_id,
            "invoiceStatusUpdated": invoice_status_updated
        }),
        created.location,
    ))
}

/// Fetch a transaction record, serving from the local cache when possible
#[instrument(skip(state))]
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    if let Some(cached) = state.store.get_transaction(&transaction_id) {
        return Ok(Json(cached));
    }

    let record = state.gateway.fetch_transaction(&transaction_id).await?;
    state
        .store
        .cache_remote_transaction(transaction_id, record.clone());

    Ok(Json(record))
}

// =============================================================================
// Helpers
// =============================================================================

fn customer_not_found() -> ApiError {
    ApiError::NotFound("Customer not found".to_string())
}

/// Coerce a JSON amount to floating-point, accepting numbers and numeric
/// strings the way the legacy backend did
fn coerce_amount(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Build a 201 response, attaching a Location header when one is available
fn created_with_location(body: Value, location: Option<String>) -> Response {
    let mut response = (StatusCode::CREATED, Json(body)).into_response();
    if let Some(loc) = location {
        if let Ok(value) = HeaderValue::from_str(&loc) {
            response.headers_mut().insert(header::LOCATION, value);
        }
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_status_mapping() {
        let response = AppError(ApiError::Validation("bad".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError(ApiError::Upstream {
            status: 402,
            message: "declined".into(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::PAYMENT_REQUIRED);
    }

    #[test]
    fn test_coerce_amount() {
        assert_eq!(coerce_amount(&json!(75.50)), Some(75.50));
        assert_eq!(coerce_amount(&json!("42.10")), Some(42.10));
        assert_eq!(coerce_amount(&json!(" 10 ")), Some(10.0));
        assert_eq!(coerce_amount(&json!("abc")), None);
        assert_eq!(coerce_amount(&json!(null)), None);
        assert_eq!(coerce_amount(&json!({"nested": 1})), None);
    }

    #[test]
    fn test_created_with_location() {
        let response = created_with_location(
            json!({"ok": true}),
            Some("/api/customers/cust-1".to_string()),
        );
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/api/customers/cust-1"
        );

        let response = created_with_location(json!({"ok": true}), None);
        assert!(response.headers().get(header::LOCATION).is_none());
    }
}
