//! Transaction model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::dates;

/// A single booked or pending transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    #[serde(default)]
    pub duplicated: bool,
    /// `normal` or `fee`.
    pub mode: String,
    /// `posted` or `pending`.
    pub status: String,
    /// Value date; the API always reports this date-only.
    pub made_on: NaiveDate,
    pub amount: f64,
    pub currency_code: String,
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(with = "dates::flexible")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "dates::flexible")]
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn made_on_decodes_as_date_only() {
        let tx: Transaction = serde_json::from_value(serde_json::json!({
            "id": "987",
            "account_id": "123",
            "mode": "normal",
            "status": "posted",
            "made_on": "2018-01-28",
            "amount": -19.99,
            "currency_code": "EUR",
            "description": "Card payment",
            "created_at": "2018-01-28T10:05:00Z",
            "updated_at": "2018-01-28T10:05:00Z",
        }))
        .expect("decodes");
        assert_eq!(tx.made_on.to_string(), "2018-01-28");
    }
}
