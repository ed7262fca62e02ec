//! The `{data, meta}` wrapper carried by every successful response.

use serde::{Deserialize, Serialize};

/// Successful response wrapper. `data` is either a single object or a list;
/// `meta` is only present on paginated list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data, meta: None }
    }
}

/// Pagination cursors. Both must be present for another page to exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page: Option<String>,
}

impl Meta {
    /// More pages exist only when the server sent both cursors.
    pub fn has_next_page(&self) -> bool {
        self.next_id.is_some() && self.next_page.is_some()
    }
}
