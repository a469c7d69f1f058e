use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported settlement currencies with their decimal precision rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar (2 decimal places)
    USD,
    /// Euro (2 decimal places)
    EUR,
    /// Pound Sterling (2 decimal places)
    GBP,
}

impl Currency {
    /// Returns the decimal scale for this currency
    pub fn scale(&self) -> u32 {
        match self {
            Currency::USD | Currency::EUR | Currency::GBP => 2,
        }
    }

    /// Rounds a decimal value to the appropriate scale for this currency
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp(self.scale())
    }

    /// Validates that an amount is non-negative and has the correct scale
    pub fn validate_amount(&self, amount: Decimal) -> Result<(), String> {
        if amount.scale() > self.scale() {
            return Err(format!(
                "{} amounts must have at most {} decimal places, got {}",
                self,
                self.scale(),
                amount.scale()
            ));
        }

        if amount < Decimal::ZERO {
            return Err(format!("{} amount cannot be negative", self));
        }

        Ok(())
    }

    /// ISO 4217 code as used on the wire by the gateway backends
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
