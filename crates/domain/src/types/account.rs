//! Account model.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::dates;

/// A bank account that belongs to a connection.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    /// Account nature (`account`, `card`, `savings`, ...).
    pub nature: String,
    pub balance: f64,
    pub currency_code: String,
    pub connection_id: String,
    #[serde(with = "dates::flexible")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "dates::flexible")]
    pub updated_at: DateTime<Utc>,
}
