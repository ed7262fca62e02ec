//! # LedgerLink Client
//!
//! Async client SDK for the LedgerLink aggregation API.
//!
//! This crate contains:
//! - The [`Client`] facade with all resource operations
//! - The single-shot [`transport`] layer and its trust precondition
//! - Cursor pagination, connection polling and the callback-URL bridge
//!
//! ## Usage
//!
//! ```no_run
//! use ledgerlink_client::{Client, ClientConfig};
//!
//! # async fn example() -> ledgerlink_domain::Result<()> {
//! let client = Client::new(ClientConfig::default())?;
//! client.set_app_credentials("app-id", "app-secret");
//! client.set_customer_secret("customer-secret");
//!
//! let providers = client.all_providers(None).await?;
//! println!("{} providers", providers.data.len());
//! # Ok(())
//! # }
//! ```

pub mod callback;
pub mod client;
pub mod config;
mod decode;
mod encoding;
pub mod fetcher;
mod headers;
mod routes;
pub mod transport;

pub use callback::{parse_callback, CALLBACK_HOST, CALLBACK_SCHEME};
pub use client::Client;
pub use config::ClientConfig;
pub use fetcher::{ConnectionFetchDelegate, PollHandle};
pub use transport::{PinningDisabled, Transport, TrustEvaluator};
