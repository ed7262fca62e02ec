//! Bank provider model.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::dates;

/// A bank integration offered by the aggregator.
#[derive(Debug, Clone, Deserialize)]
pub struct Provider {
    pub id: String,
    pub code: String,
    pub name: String,
    /// Integration mode (`web`, `api`, `oauth`, `file`).
    pub mode: String,
    pub status: String,
    pub country_code: String,
    #[serde(default)]
    pub interactive: bool,
    #[serde(default)]
    pub automatic_fetch: bool,
    #[serde(default)]
    pub instruction: Option<String>,
    #[serde(default)]
    pub home_url: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(with = "dates::flexible")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "dates::flexible")]
    pub updated_at: DateTime<Utc>,
}

impl Provider {
    /// Whether connecting goes through the provider's own OAuth flow.
    pub fn is_oauth(&self) -> bool {
        self.mode == "oauth"
    }
}
