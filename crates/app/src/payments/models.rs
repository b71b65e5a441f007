//! Payment Models

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Checkout request sent to the provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentPreference {
    pub items: Vec<PreferenceItem>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer: Option<Payer>,

    pub back_urls: BackUrls,

    pub auto_return: AutoReturn,
}

/// One line of a payment preference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreferenceItem {
    pub id: String,
    pub title: String,
    pub quantity: u32,
    pub currency_id: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payer {
    pub email: String,
}

/// Where the provider sends the buyer after each outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackUrls {
    pub success: String,
    pub failure: String,
    pub pending: String,
}

impl BackUrls {
    /// Derive `/success`, `/failure` and `/pending` from the public base URL.
    #[must_use]
    pub fn from_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/');

        Self {
            success: format!("{base}/success"),
            failure: format!("{base}/failure"),
            pending: format!("{base}/pending"),
        }
    }
}

/// Which outcomes return to the shop without the buyer clicking through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoReturn {
    Approved,
}

/// Provider reply: the HTTP status plus the decoded body, if there was one.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderReply<T> {
    pub status: u16,
    pub response: Option<T>,
}

impl<T> ProviderReply<T> {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Body returned when creating a preference (or the provider's error body).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PreferenceResponse {
    pub id: Option<String>,
    pub init_point: Option<String>,
    pub sandbox_init_point: Option<String>,
    pub message: Option<String>,
}

/// Body returned when fetching a payment (or the provider's error body).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PaymentResponse {
    /// Payment status. Error bodies reuse the key for the numeric HTTP code,
    /// which is dropped.
    #[serde(default, deserialize_with = "payment_status")]
    pub status: Option<String>,

    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub transaction_amount: Option<Decimal>,

    pub payment_method_id: Option<String>,
    pub date_created: Option<String>,
    pub payer: Option<PaymentPayer>,
    pub message: Option<String>,
}

fn payment_status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(status)) => Some(status),
        _ => None,
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PaymentPayer {
    pub email: Option<String>,
}

/// A field the provider may or may not have reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reported<T> {
    Value(T),
    NotAvailable,
}

impl<T> Reported<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reported<U> {
        match self {
            Self::Value(value) => Reported::Value(f(value)),
            Self::NotAvailable => Reported::NotAvailable,
        }
    }
}

impl<T> From<Option<T>> for Reported<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::NotAvailable, Self::Value)
    }
}

impl<T: Display> Display for Reported<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Value(value) => value.fmt(f),
            Self::NotAvailable => f.write_str("not available"),
        }
    }
}

/// Status used when the provider reports none.
pub const UNKNOWN_STATUS: &str = "UNKNOWN";

/// User-facing snapshot of a payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentStatus {
    pub payment_id: String,

    /// Uppercased provider status; the set of values is the provider's.
    pub status: String,

    pub amount: Reported<Decimal>,
    pub method: Reported<String>,
    pub created_at: Reported<String>,
    pub payer_email: Reported<String>,
}

impl PaymentStatus {
    /// Project a provider body, marking anything missing as not available.
    #[must_use]
    pub fn from_response(payment_id: &str, response: PaymentResponse) -> Self {
        Self {
            payment_id: payment_id.to_owned(),
            status: response
                .status
                .filter(|status| !status.trim().is_empty())
                .map_or_else(|| UNKNOWN_STATUS.to_owned(), |status| status.to_uppercase()),
            amount: response.transaction_amount.into(),
            method: response.payment_method_id.into(),
            created_at: response.date_created.into(),
            payer_email: response.payer.and_then(|payer| payer.email).into(),
        }
    }
}
