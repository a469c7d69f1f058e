use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Currency, Result};

/// Payment gateway capability set.
///
/// Every backend accepts the caller's canonical transaction shapes,
/// translates them into its own wire protocol, runs the exchange through
/// the HTTP transport, and translates the wire response back into a
/// [`TransactionResult`] or a structured failure.
pub trait PaymentGateway: Send + Sync {
    /// Charge the card for the full amount in one step
    fn purchase(&self, request: &TransactionRequest) -> Result<TransactionResult>;

    /// Return funds for a previously settled transaction
    fn refund(&self, request: &RefundRequest) -> Result<TransactionResult>;

    /// Cancel a transaction that has not yet settled
    fn void(&self, request: &VoidRequest) -> Result<TransactionResult>;

    /// Get gateway name
    fn name(&self) -> &str;

    /// Check if gateway supports a currency
    fn supports_currency(&self, currency: Currency) -> bool;
}

/// Merchant credentials, passed per request.
///
/// Backends map the two fields onto their own vocabulary (API login id and
/// transaction key, username and password, and so on).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub merchant_id: String,
    pub merchant_key: String,
}

/// Card data for a purchase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDetails {
    /// Primary account number
    pub number: String,

    /// Expiry month, 1-12
    pub expiry_month: u8,

    /// Four-digit expiry year
    pub expiry_year: u16,

    /// Card verification code
    pub cvv: String,
}

impl CardDetails {
    /// Expiry in the MMYY form the card processors expect
    pub fn expiry_mmyy(&self) -> String {
        format!("{:02}{:02}", self.expiry_month, self.expiry_year % 100)
    }
}

/// Canonical purchase request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRequest {
    /// Caller's reference for this transaction (order/invoice id)
    pub reference: String,

    /// Amount to charge
    pub amount: Decimal,

    /// Currency
    pub currency: Currency,

    /// Card to charge
    pub card: CardDetails,

    /// Customer email (optional)
    pub customer_email: Option<String>,

    /// Free-text description (optional)
    pub description: Option<String>,

    /// Merchant credentials for the selected backend
    pub credentials: Credentials,
}

impl TransactionRequest {
    /// Business-rule validation shared by all backends.
    pub fn validate(&self) -> Result<()> {
        self.currency
            .validate_amount(self.amount)
            .map_err(AppError::validation)?;

        if !(1..=12).contains(&self.card.expiry_month) {
            return Err(AppError::validation("card expiry month must be 1-12"));
        }

        if self.card.number.is_empty() {
            return Err(AppError::validation("card number must not be empty"));
        }

        Ok(())
    }
}

/// Canonical refund request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundRequest {
    /// Gateway's reference for the original transaction
    pub gateway_reference: String,

    /// Amount to return
    pub amount: Decimal,

    /// Currency of the original transaction
    pub currency: Currency,

    /// Card number (or its last four digits) from the original transaction
    pub card_number: String,

    /// Merchant credentials for the selected backend
    pub credentials: Credentials,
}

/// Canonical void request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoidRequest {
    /// Gateway's reference for the transaction to cancel
    pub gateway_reference: String,

    /// Merchant credentials for the selected backend
    pub credentials: Credentials,
}

/// Transaction outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Backend accepted the transaction
    Approved,
    /// Backend rejected the transaction (issuer decline)
    Declined,
    /// Backend reported an error, or no exchange took place at all
    Error,
}

/// Canonical transaction result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionResult {
    /// Gateway transaction reference, when the backend issued one
    pub gateway_reference: Option<String>,

    /// Outcome
    pub status: TransactionStatus,

    /// Backend's human-readable response text
    pub message: String,

    /// Full backend response, preserved for auditing
    pub raw_response: serde_json::Value,

    /// When the result was produced
    pub processed_at: DateTime<Utc>,
}

impl TransactionResult {
    pub fn is_approved(&self) -> bool {
        self.status == TransactionStatus::Approved
    }

    /// Canonical result for a sentinel transport response: no exchange took
    /// place, so there is no gateway reference and the status is `Error`.
    /// The diagnostic message is lifted out of the synthetic error body.
    pub fn from_transport_failure(response: &crate::net::HttpResponse) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(&response.body)
            .ok()
            .and_then(|value| value["message"].as_str().map(str::to_owned))
            .unwrap_or_else(|| response.body.clone());

        Self {
            gateway_reference: None,
            status: TransactionStatus::Error,
            message,
            raw_response: serde_json::Value::String(response.body.clone()),
            processed_at: Utc::now(),
        }
    }
}
