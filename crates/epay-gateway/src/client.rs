//! # Gateway Client
//!
//! HTTP client for the ePay gateway. Every call is authenticated with basic
//! auth, runs under a fixed timeout, and translates failures into the shared
//! error taxonomy: upstream HTTP errors relay the gateway's status code with
//! a message extracted from its body, network-level failures become a 503
//! with a diagnostic message, and anything else surfaces as a 500.

use crate::config::GatewayConfig;
use epay_core::{ApiError, ApiResult};
use reqwest::header::LOCATION;
use reqwest::{Client, Response, StatusCode};
use serde_json::{Map, Value};
use tracing::{debug, error, info, instrument};

/// Result of a successful token creation
#[derive(Debug, Clone)]
pub struct TokenCreated {
    /// Gateway token identifier
    pub token_id: String,
    /// Location header from the gateway, if present
    pub location: Option<String>,
}

/// Result of a successful transaction submission
#[derive(Debug, Clone)]
pub struct TransactionCreated {
    /// Gateway transaction identifier
    pub id: String,
    /// Gateway public identifier, if returned
    pub public_id: Option<String>,
    /// Gateway-reported status (defaults to `Completed`)
    pub status: String,
    /// Location header from the gateway, if present
    pub location: Option<String>,
}

/// Authenticated client for the ePay gateway
pub struct GatewayClient {
    config: GatewayConfig,
    client: Client,
}

impl GatewayClient {
    /// Create a new gateway client from configuration
    pub fn new(config: GatewayConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| ApiError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> ApiResult<Self> {
        let config = GatewayConfig::from_env()?;
        Self::new(config)
    }

    /// The configured gateway base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Validate a tokenization request body and shape it for the gateway.
    ///
    /// Requires `emailAddress` and `payerName`, plus at least one of
    /// `creditCardInformation` or `bankAccountInformation`. When both payment
    /// methods are present, card information wins and the bank fields are
    /// stripped before forwarding.
    pub fn prepare_token_payload(body: &Value) -> ApiResult<Value> {
        let data = body.as_object().ok_or_else(missing_customer_fields)?;

        if !data.contains_key("emailAddress") || !data.contains_key("payerName") {
            return Err(missing_customer_fields());
        }

        let mut forwarded: Map<String, Value> = data.clone();
        if forwarded.contains_key("creditCardInformation") {
            forwarded.remove("bankAccountInformation");
        } else if forwarded.contains_key("bankAccountInformation") {
            forwarded.remove("creditCardInformation");
        } else {
            return Err(ApiError::Validation(
                "Missing 'creditCardInformation' or 'bankAccountInformation' in request body."
                    .to_string(),
            ));
        }

        Ok(Value::Object(forwarded))
    }

    /// Validate a transaction request body and split off the local
    /// `invoiceId` field before forwarding.
    ///
    /// Returns the forwarded payload and the extracted invoice id (`None`
    /// when absent or JSON null).
    pub fn prepare_transaction_payload(body: &Value) -> ApiResult<(Value, Option<Value>)> {
        let data = body.as_object().ok_or_else(missing_transaction_fields)?;

        if !data.contains_key("amount") || !data.contains_key("tokenId") {
            return Err(missing_transaction_fields());
        }

        let mut forwarded: Map<String, Value> = data.clone();
        let invoice_id = forwarded.remove("invoiceId").filter(|v| !v.is_null());

        Ok((Value::Object(forwarded), invoice_id))
    }

    /// POST a shaped tokenization payload to the gateway
    #[instrument(skip(self, payload))]
    pub async fn create_token(&self, payload: &Value) -> ApiResult<TokenCreated> {
        let url = format!("{}/tokens", self.config.base_url);
        debug!("Creating gateway token");

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .json(payload)
            .send()
            .await
            .map_err(|e| self.network_error(&e))?;

        let (status, location, body) = self.read_response(response).await?;
        if !status.is_success() {
            return Err(relay_error("Token", status.as_u16(), &body));
        }

        let data: Value = parse_body(&body)?;
        let token_id = data
            .get("tokenId")
            .and_then(Value::as_str)
            .or_else(|| data.get("id").and_then(Value::as_str))
            .ok_or_else(|| {
                ApiError::Internal(
                    "Token API succeeded but did not return a Token ID.".to_string(),
                )
            })?
            .to_string();

        info!("Created gateway token: id={}", token_id);

        Ok(TokenCreated { token_id, location })
    }

    /// POST a shaped transaction payload to the gateway
    #[instrument(skip(self, payload))]
    pub async fn submit_transaction(&self, payload: &Value) -> ApiResult<TransactionCreated> {
        let url = format!("{}/transactions", self.config.base_url);
        debug!("Submitting gateway transaction");

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .json(payload)
            .send()
            .await
            .map_err(|e| self.network_error(&e))?;

        let (status, location, body) = self.read_response(response).await?;
        if !status.is_success() {
            return Err(relay_error("Transaction", status.as_u16(), &body));
        }

        let data: Value = parse_body(&body)?;
        let id = data
            .get("transactionId")
            .and_then(Value::as_str)
            .or_else(|| data.get("id").and_then(Value::as_str))
            .ok_or_else(|| {
                ApiError::Internal(
                    "Transaction API succeeded but did not return a Transaction ID.".to_string(),
                )
            })?
            .to_string();

        let public_id = data
            .get("publicId")
            .and_then(Value::as_str)
            .map(String::from);

        let txn_status = data
            .get("status")
            .and_then(Value::as_str)
            .unwrap_or("Completed")
            .to_string();

        info!("Submitted gateway transaction: id={}", id);

        Ok(TransactionCreated {
            id,
            public_id,
            status: txn_status,
            location,
        })
    }

    /// GET the status record of a gateway transaction
    #[instrument(skip(self))]
    pub async fn fetch_transaction(&self, transaction_id: &str) -> ApiResult<Value> {
        let url = format!("{}/transactions/{}", self.config.base_url, transaction_id);
        debug!("Fetching gateway transaction: id={}", transaction_id);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .send()
            .await
            .map_err(|e| self.network_error(&e))?;

        let (status, _location, body) = self.read_response(response).await?;
        if !status.is_success() {
            return Err(relay_error("Status Check", status.as_u16(), &body));
        }

        parse_body(&body)
    }

    /// Consume a response into (status, Location header, body text)
    async fn read_response(
        &self,
        response: Response,
    ) -> ApiResult<(StatusCode, Option<String>, String)> {
        let status = response.status();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        // A transport failure while reading the body is still a network
        // failure and gets the same 503 diagnostic as a failed send
        let body = response
            .text()
            .await
            .map_err(|e| self.network_error(&e))?;

        Ok((status, location, body))
    }

    /// Map a transport-level failure to a 503 with a diagnostic message
    fn network_error(&self, err: &reqwest::Error) -> ApiError {
        error!("Gateway request failed: {}", err);
        ApiError::Unavailable(format!(
            "Network Error (503): Connection failed. Check if API Key/Secret is correct, \
             or if your firewall blocks port 443 access to {}. (Check IP Whitelisting)",
            self.config.base_url
        ))
    }
}

/// Relay an upstream HTTP error, extracting `error` or `message` from the
/// gateway's JSON body and falling back to the raw response text
fn relay_error(context: &str, status: u16, body: &str) -> ApiError {
    let extracted = serde_json::from_str::<Value>(body).ok().and_then(|parsed| {
        parsed
            .get("error")
            .and_then(Value::as_str)
            .or_else(|| parsed.get("message").and_then(Value::as_str))
            .map(String::from)
    });
    let message = extracted.unwrap_or_else(|| body.to_string());

    error!("Gateway error: context={}, status={}", context, status);

    ApiError::Upstream {
        status,
        message: format!("External {} API Error ({}): {}", context, status, message),
    }
}

fn parse_body(body: &str) -> ApiResult<Value> {
    serde_json::from_str(body)
        .map_err(|e| ApiError::Internal(format!("Failed to parse gateway response: {}", e)))
}

fn missing_customer_fields() -> ApiError {
    ApiError::Validation(
        "Missing required customer fields: 'emailAddress' or 'payerName'.".to_string(),
    )
}

fn missing_transaction_fields() -> ApiError {
    ApiError::Validation("Missing required fields: amount or tokenId.".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prepare_token_requires_customer_fields() {
        let err = GatewayClient::prepare_token_payload(&json!({
            "payerName": "Alice",
            "creditCardInformation": {"cardNumber": "4111"}
        }))
        .unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.to_string().contains("emailAddress"));
    }

    #[test]
    fn test_prepare_token_requires_payment_method() {
        let err = GatewayClient::prepare_token_payload(&json!({
            "emailAddress": "alice@example.com",
            "payerName": "Alice"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("creditCardInformation"));
    }

    #[test]
    fn test_prepare_token_card_wins_over_bank() {
        let payload = GatewayClient::prepare_token_payload(&json!({
            "emailAddress": "alice@example.com",
            "payerName": "Alice",
            "creditCardInformation": {"cardNumber": "4111"},
            "bankAccountInformation": {"routingNumber": "021"}
        }))
        .unwrap();

        assert!(payload.get("creditCardInformation").is_some());
        assert!(payload.get("bankAccountInformation").is_none());
    }

    #[test]
    fn test_prepare_token_keeps_single_method() {
        let payload = GatewayClient::prepare_token_payload(&json!({
            "emailAddress": "alice@example.com",
            "payerName": "Alice",
            "bankAccountInformation": {"routingNumber": "021"}
        }))
        .unwrap();

        assert!(payload.get("bankAccountInformation").is_some());
        assert!(payload.get("creditCardInformation").is_none());
    }

    #[test]
    fn test_prepare_transaction_pops_invoice_id() {
        let (payload, invoice_id) = GatewayClient::prepare_transaction_payload(&json!({
            "amount": 75.50,
            "tokenId": "tok-1",
            "invoiceId": "inv-1"
        }))
        .unwrap();

        assert!(payload.get("invoiceId").is_none());
        assert_eq!(payload.get("tokenId").unwrap(), "tok-1");
        assert_eq!(invoice_id.unwrap(), json!("inv-1"));
    }

    #[test]
    fn test_prepare_transaction_null_invoice_id_is_absent() {
        let (_, invoice_id) = GatewayClient::prepare_transaction_payload(&json!({
            "amount": 10,
            "tokenId": "tok-1",
            "invoiceId": null
        }))
        .unwrap();
        assert!(invoice_id.is_none());
    }

    #[test]
    fn test_prepare_transaction_missing_fields() {
        let err =
            GatewayClient::prepare_transaction_payload(&json!({"amount": 10})).unwrap_err();
        assert_eq!(err.to_string(), "Missing required fields: amount or tokenId.");
    }

    #[test]
    fn test_relay_error_extracts_json_message() {
        let err = relay_error("Token", 422, r#"{"error": "invalid card number"}"#);
        assert_eq!(err.status_code(), 422);
        assert_eq!(
            err.to_string(),
            "External Token API Error (422): invalid card number"
        );

        let err = relay_error("Transaction", 402, r#"{"message": "declined"}"#);
        assert_eq!(err.to_string(), "External Transaction API Error (402): declined");
    }

    #[test]
    fn test_relay_error_falls_back_to_raw_text() {
        let err = relay_error("Status Check", 500, "gateway exploded");
        assert_eq!(err.status_code(), 500);
        assert_eq!(
            err.to_string(),
            "External Status Check API Error (500): gateway exploded"
        );
    }
}
