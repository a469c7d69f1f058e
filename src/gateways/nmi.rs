use std::collections::BTreeMap;

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

const DEFAULT_URL: &str = "https://secure.networkmerchants.com/api/transact.php";
const GATEWAY_NAME: &str = "nmi";

/// NMI-family payment gateway.
///
/// Form-urlencoded POST in, query-string-shaped response out
/// (`response=1&responsetext=SUCCESS&transactionid=...`); `response` is 1
/// for approved, 2 for declined, 3 for error.
pub struct NmiGateway {
    base_url: String,
}

impl NmiGateway {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_URL)
    }

    pub fn with_endpoint(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        match &config.nmi_endpoint {
            Some(url) => Self::with_endpoint(url.clone()),
            None => Self::new(),
        }
    }

    fn base_fields(credentials: &Credentials) -> Vec<(String, String)> {
        vec![
            ("username".into(), credentials.merchant_id.clone()),
            ("password".into(), credentials.merchant_key.clone()),
        ]
    }

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
        // BTreeMap keeps the audit copy in a stable field order
        let fields: BTreeMap<String, String> =
            form_urlencoded::parse(body.as_bytes()).into_owned().collect();

        let status = match fields.get("response").map(String::as_str) {
            Some("1") => TransactionStatus::Approved,
            Some("2") => TransactionStatus::Declined,
            Some("3") => TransactionStatus::Error,
            other => {
                return Err(AppError::gateway(format!(
                    "{}: unrecognized response code {:?}",
                    GATEWAY_NAME, other
                )))
            }
        };

        let message = fields.get("responsetext").cloned().unwrap_or_default();
        let gateway_reference = fields
            .get("transactionid")
            .filter(|id| !id.is_empty())
            .cloned();
        let raw_response = serde_json::to_value(&fields)?;

        Ok(TransactionResult {
            gateway_reference,
            status,
            message,
            raw_response,
            processed_at: Utc::now(),
        })
    }
}

impl Default for NmiGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentGateway for NmiGateway {
    fn purchase(&self, request: &TransactionRequest) -> Result<TransactionResult> {
        request.validate()?;

        let mut fields = Self::base_fields(&request.credentials);
        fields.push(("type".into(), "sale".into()));
        fields.push(("ccnumber".into(), request.card.number.clone()));
        fields.push(("ccexp".into(), request.card.expiry_mmyy()));
        fields.push(("cvv".into(), request.card.cvv.clone()));
        fields.push((
            "amount".into(),
            request.currency.round(request.amount).to_string(),
        ));
        fields.push(("currency".into(), request.currency.code().into()));
        fields.push(("orderid".into(), request.reference.clone()));
        if let Some(email) = &request.customer_email {
            fields.push(("email".into(), email.clone()));
        }
        if let Some(description) = &request.description {
            fields.push(("order_description".into(), description.clone()));
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
        fields.push(("type".into(), "refund".into()));
        fields.push(("transactionid".into(), request.gateway_reference.clone()));
        fields.push((
            "amount".into(),
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
        fields.push(("type".into(), "void".into()));
        fields.push(("transactionid".into(), request.gateway_reference.clone()));

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
        matches!(currency, Currency::USD | Currency::EUR | Currency::GBP)
    }
}
