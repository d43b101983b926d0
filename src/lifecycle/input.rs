//! Request payloads for the transitions that take parameters.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::direction::Direction;
use super::error::LifecycleError;

/// Payload of a toggle-order request: `{ onOrder, pricePaid?, orderDate? }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInput {
    pub on_order: bool,
    #[serde(default)]
    pub price_paid: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_order_date")]
    pub order_date: Option<DateTime<Utc>>,
}

impl OrderInput {
    /// Put the item on order.
    pub fn place() -> Self {
        Self {
            on_order: true,
            price_paid: None,
            order_date: None,
        }
    }

    /// Take the item off order (it goes back to the wishlist).
    pub fn cancel() -> Self {
        Self {
            on_order: false,
            price_paid: None,
            order_date: None,
        }
    }

    pub fn with_price_paid(mut self, price: f64) -> Self {
        self.price_paid = Some(price);
        self
    }

    pub fn with_order_date(mut self, date: DateTime<Utc>) -> Self {
        self.order_date = Some(date);
        self
    }

    /// Decode and validate a JSON payload.
    pub fn from_json(value: Value) -> Result<Self, LifecycleError> {
        let input: Self = serde_json::from_value(value).map_err(|e| {
            LifecycleError::InvalidArgument(format!("malformed toggle-order payload: {e}"))
        })?;
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> Result<(), LifecycleError> {
        match self.price_paid {
            Some(price) if !price.is_finite() || price < 0.0 => Err(
                LifecycleError::InvalidArgument(format!("pricePaid must be a non-negative number, got {price}")),
            ),
            _ => Ok(()),
        }
    }
}

/// Payload of a cycle-status request: `{ direction? }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CycleInput {
    #[serde(default)]
    pub direction: Option<String>,
}

impl CycleInput {
    pub fn from_json(value: Value) -> Result<Self, LifecycleError> {
        serde_json::from_value(value).map_err(|e| {
            LifecycleError::InvalidArgument(format!("malformed cycle-status payload: {e}"))
        })
    }

    /// The requested direction, forward when omitted.
    pub fn direction(&self) -> Result<Direction, LifecycleError> {
        match &self.direction {
            None => Ok(Direction::Forward),
            Some(raw) => raw.parse(),
        }
    }
}

/// Parse an order date given either as RFC 3339 or as a bare `YYYY-MM-DD`
/// (taken as midnight UTC).
pub fn parse_order_date(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("orderDate '{raw}' is not an RFC 3339 timestamp or YYYY-MM-DD date"))
}

fn deserialize_order_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(raw) if !raw.trim().is_empty() => parse_order_date(&raw)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}
