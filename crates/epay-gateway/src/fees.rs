//! # Fee Estimation
//!
//! Local fee estimation. The gateway exposes no fee endpoint in the demo
//! environment, so fees are computed with a placeholder schedule: 3% + $0.30
//! for cards, 0.5% + $0.05 for ACH, each rounded to cents and rendered as
//! fixed two-decimal strings.

use epay_core::{ApiError, ApiResult};
use serde::Serialize;

/// Fee quote for a single payment amount
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeQuote {
    /// Credit card payer fee, e.g. `"3.30"`
    pub credit_card_payer_fee: String,

    /// ACH payer fee, e.g. `"0.55"`
    pub ach_payer_fee: String,

    pub message: String,
}

/// Compute a fee quote from the raw `amount` query parameter.
///
/// The parameter must parse as a positive number; otherwise this returns a
/// validation error matching the backend's error messages.
pub fn quote_fees(raw_amount: Option<&str>) -> ApiResult<FeeQuote> {
    let amount: f64 = raw_amount
        .and_then(|raw| raw.parse().ok())
        .ok_or_else(|| ApiError::Validation("Invalid amount parameter.".to_string()))?;

    if amount <= 0.0 {
        return Err(ApiError::Validation(
            "Amount must be a positive number.".to_string(),
        ));
    }

    let cc_fee = round_cents(amount * 0.03 + 0.30);
    let ach_fee = round_cents(amount * 0.005 + 0.05);

    Ok(FeeQuote {
        credit_card_payer_fee: format!("{:.2}", cc_fee),
        ach_payer_fee: format!("{:.2}", ach_fee),
        message: "Mock fees calculated successfully.".to_string(),
    })
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_for_100() {
        let quote = quote_fees(Some("100")).unwrap();
        assert_eq!(quote.credit_card_payer_fee, "3.30");
        assert_eq!(quote.ach_payer_fee, "0.55");
    }

    #[test]
    fn test_quote_for_larger_amount() {
        let quote = quote_fees(Some("200")).unwrap();
        assert_eq!(quote.credit_card_payer_fee, "6.30");
        assert_eq!(quote.ach_payer_fee, "1.05");
    }

    #[test]
    fn test_missing_or_malformed_amount() {
        assert!(matches!(quote_fees(None), Err(ApiError::Validation(_))));
        assert!(matches!(
            quote_fees(Some("abc")),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn test_non_positive_amount() {
        let err = quote_fees(Some("0")).unwrap_err();
        assert_eq!(err.to_string(), "Amount must be a positive number.");
        assert!(quote_fees(Some("-5")).is_err());
    }

    #[test]
    fn test_fixed_two_decimal_formatting() {
        let quote = quote_fees(Some("10")).unwrap();
        assert_eq!(quote.credit_card_payer_fee, "0.60");
        assert_eq!(quote.ach_payer_fee, "0.10");
    }
}
