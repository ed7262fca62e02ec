//! Customer model.

use serde::Deserialize;

/// A customer of the client application. The `secret` scopes all
/// connection-related calls made on behalf of this customer.
#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    pub id: String,
    pub identifier: String,
    pub secret: String,
}
