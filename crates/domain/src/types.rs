//! Domain models for the aggregation API.

pub mod account;
pub mod callback;
pub mod connection;
pub mod customer;
pub mod envelope;
pub mod params;
pub mod provider;
pub mod transaction;

pub use account::Account;
pub use callback::{CallbackStage, ConnectCallback};
pub use connection::{Attempt, Connection, RemovedConnection, Stage, StageName};
pub use customer::Customer;
pub use envelope::{Envelope, Meta};
pub use params::{
    AccountParams, ConnectionInteractiveParams, ConnectionParams, ConnectionReconnectParams,
    ConnectionRefreshParams, CustomerParams, ProviderParams, TransactionParams,
};
pub use provider::Provider;
pub use transaction::Transaction;
