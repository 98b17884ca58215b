//! Infrastructure layer: config, account storage, and the service facade an
//! adapter (REST handler, job, CLI) calls into.

pub mod config;
pub mod service;
pub mod store;

pub use config::{ConfigError, LedgerConfig};
pub use service::AccountService;
pub use store::{AccountStore, InMemoryAccountStore, SharedAccount};
