use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Amounts are shown with this many decimal places on the console.
pub const CURRENCY_DIGITS: u32 = 2;

/// A sale as found in the JSON source, before its date is looked at. Any field
/// we don't know about lands in `extra` so it survives the load.
#[derive(Debug, Deserialize)]
pub(crate) struct RawSale {
    #[serde(rename = "data")]
    pub date: String,
    #[serde(rename = "valor_total")]
    pub total: Decimal,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One row of the sales table. The timestamp keeps the time of day when the
/// source had one; aggregation only ever looks at `date()`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Sale {
    pub timestamp: NaiveDateTime,
    pub total: Decimal,
    pub extra: Map<String, Value>,
}

impl Sale {
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// Errors that stop the report; there is no recovery path for a bad record, the
/// whole table is rejected.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed sales JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Sale #{index} has an unreadable date {value:?}")]
    InvalidDate { index: usize, value: String },
    #[error("Sales total overflows when adding {amount} sold on {date}")]
    Overflow { date: NaiveDate, amount: Decimal },
}
