// Finanzas Ledger - Core Library
// Exposes the ledger core for use in the CLI, the API server, and tests

pub mod error;
pub mod ledger;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use error::LedgerError;
pub use ledger::{
    is_known_category, CategoryPolicy, LedgerSummary, Transaction, TransactionType, CATEGORIES,
};
pub use service::{LedgerService, LedgerView, NewTransaction};
pub use store::LedgerStore;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
