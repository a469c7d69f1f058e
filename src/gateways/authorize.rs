use chrono::Utc;
use tracing::info;
use url::form_urlencoded;

use super::gateway_trait::{
    Credentials, PaymentGateway, RefundRequest, TransactionRequest, TransactionResult,
    TransactionStatus, VoidRequest,
};
use crate::config::Config;
use crate::core::{AppError, Currency, Result};
use crate::net::{http_post, ContentType};

const SANDBOX_URL: &str = "https://test.authorize.net/gateway/transact.dll";
const GATEWAY_NAME: &str = "authorize";

/// Field separator requested via `x_delim_char`
const DELIMITER: char = '|';

/// Authorize-family card-authorization gateway.
///
/// Speaks the AIM wire protocol: a form-urlencoded POST of `x_`-prefixed
/// fields, answered with one delimited text line whose first field is the
/// response code (1 approved, 2 declined, 3 error).
pub struct AuthorizeGateway {
    base_url: String,
}

impl AuthorizeGateway {
    /// Create a gateway pointed at the processor's sandbox URL
    pub fn new() -> Self {
        Self::with_endpoint(SANDBOX_URL)
    }

    /// Create a gateway pointed at a specific endpoint
    pub fn with_endpoint(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Create a gateway applying the configured endpoint override, if any
    pub fn from_config(config: &Config) -> Self {
        match &config.authorize_endpoint {
            Some(url) => Self::with_endpoint(url.clone()),
            None => Self::new(),
        }
    }

    /// Fields common to every AIM request
    fn base_fields(credentials: &Credentials) -> Vec<(String, String)> {
        vec![
            ("x_login".into(), credentials.merchant_id.clone()),
            ("x_tran_key".into(), credentials.merchant_key.clone()),
            ("x_version".into(), "3.1".into()),
            ("x_delim_data".into(), "TRUE".into()),
            ("x_delim_char".into(), DELIMITER.to_string()),
            ("x_relay_response".into(), "FALSE".into()),
            ("x_method".into(), "CC".into()),
        ]
    }

    /// One POST per attempt; the transport's sentinel is mapped to an
    /// `Error` result, a non-2xx server status to a gateway error.
    fn dispatch(&self, fields: Vec<(String, String)>) -> Result<TransactionResult> {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in &fields {
            serializer.append_pair(name, value);
        }
        let body = serializer.finish();

        let response = http_post(&self.base_url, &body, &ContentType::form_urlencoded());

        if response.is_transport_failure() {
            return Ok(TransactionResult::from_transport_failure(&response));
        }

        if !response.is_success() {
            return Err(AppError::gateway(format!(
                "{} API error - HTTP {} ({})",
                GATEWAY_NAME, response.status_code, response.body
            )));
        }

        Self::parse_reply(&response.body)
    }

    fn parse_reply(body: &str) -> Result<TransactionResult> {
        let fields: Vec<&str> = body.split(DELIMITER).collect();

        let status = match *fields.first().unwrap_or(&"") {
            "1" => TransactionStatus::Approved,
            "2" => TransactionStatus::Declined,
            "3" => TransactionStatus::Error,
            other => {
                return Err(AppError::gateway(format!(
                    "{}: unrecognized response code '{}'",
                    GATEWAY_NAME, other
                )))
            }
        };

        let message = fields.get(3).unwrap_or(&"").to_string();
        let gateway_reference = fields
            .get(6)
            .filter(|id| !id.is_empty() && **id != "0")
            .map(|id| id.to_string());

        Ok(TransactionResult {
            gateway_reference,
            status,
            message,
            raw_response: serde_json::Value::String(body.to_owned()),
            processed_at: Utc::now(),
        })
    }
}

impl Default for AuthorizeGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentGateway for AuthorizeGateway {
    fn purchase(&self, request: &TransactionRequest) -> Result<TransactionResult> {
        request.validate()?;
        if !self.supports_currency(request.currency) {
            return Err(AppError::validation(format!(
                "{} does not support {}",
                GATEWAY_NAME, request.currency
            )));
        }

        let mut fields = Self::base_fields(&request.credentials);
        fields.push(("x_type".into(), "AUTH_CAPTURE".into()));
        fields.push((
            "x_amount".into(),
            request.currency.round(request.amount).to_string(),
        ));
        fields.push(("x_currency_code".into(), request.currency.code().into()));
        fields.push(("x_card_num".into(), request.card.number.clone()));
        fields.push(("x_exp_date".into(), request.card.expiry_mmyy()));
        fields.push(("x_card_code".into(), request.card.cvv.clone()));
        fields.push(("x_invoice_num".into(), request.reference.clone()));
        if let Some(email) = &request.customer_email {
            fields.push(("x_email".into(), email.clone()));
        }
        if let Some(description) = &request.description {
            fields.push(("x_description".into(), description.clone()));
        }

        info!(
            gateway = GATEWAY_NAME,
            reference = %request.reference,
            amount = %request.amount,
            "submitting purchase"
        );
        self.dispatch(fields)
    }

    fn refund(&self, request: &RefundRequest) -> Result<TransactionResult> {
        let mut fields = Self::base_fields(&request.credentials);
        fields.push(("x_type".into(), "CREDIT".into()));
        fields.push(("x_trans_id".into(), request.gateway_reference.clone()));
        fields.push(("x_card_num".into(), request.card_number.clone()));
        fields.push((
            "x_amount".into(),
            request.currency.round(request.amount).to_string(),
        ));

        info!(
            gateway = GATEWAY_NAME,
            gateway_reference = %request.gateway_reference,
            "submitting refund"
        );
        self.dispatch(fields)
    }

    fn void(&self, request: &VoidRequest) -> Result<TransactionResult> {
        let mut fields = Self::base_fields(&request.credentials);
        fields.push(("x_type".into(), "VOID".into()));
        fields.push(("x_trans_id".into(), request.gateway_reference.clone()));

        info!(
            gateway = GATEWAY_NAME,
            gateway_reference = %request.gateway_reference,
            "submitting void"
        );
        self.dispatch(fields)
    }

    fn name(&self) -> &str {
        GATEWAY_NAME
    }

    fn supports_currency(&self, currency: Currency) -> bool {
        // The card-authorization processor settles in USD only
        matches!(currency, Currency::USD)
    }
}
