//! Parsing and validation of the amount typed into the deposit, withdraw and transfer forms.

use std::fmt::Display;

use serde::Serialize;

use crate::client::ClientError;

/// The message shown when the amount field does not hold a positive number.
pub const INVALID_AMOUNT_MESSAGE: &str = "Valor inválido. Insira um número positivo.";

/// A positive, finite amount of money in BRL.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    /// Parse the raw text of an amount input.
    ///
    /// Surrounding whitespace is ignored and a single decimal comma is accepted in place of
    /// a decimal point, so "10,5" is 10.5 and "10," is 10.
    ///
    /// # Errors
    /// Returns [ClientError::Validation] if the text is empty, is not a plain decimal number,
    /// or is not strictly positive and finite.
    pub fn parse(input: &str) -> Result<Self, ClientError> {
        let sanitized = sanitize_amount_input(input);

        if sanitized.is_empty() || sanitized.matches('.').count() > 1 {
            return Err(invalid_amount());
        }

        let is_plain_decimal = sanitized
            .strip_prefix(['-', '+'])
            .unwrap_or(&sanitized)
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.');

        if !is_plain_decimal {
            return Err(invalid_amount());
        }

        let value: f64 = sanitized.parse().map_err(|_| invalid_amount())?;

        Self::new(value)
    }

    /// Create an amount from a number.
    ///
    /// # Errors
    /// Returns [ClientError::Validation] if `value` is NaN, infinite, zero or negative.
    pub fn new(value: f64) -> Result<Self, ClientError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(invalid_amount())
        }
    }

    /// The amount as a number.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Trim `input` and swap a decimal comma for a decimal point.
pub fn sanitize_amount_input(input: &str) -> String {
    input.trim().replace(',', ".")
}

fn invalid_amount() -> ClientError {
    ClientError::Validation(INVALID_AMOUNT_MESSAGE.to_owned())
}
