//! Append-only record store.
//!
//! The store is the system of record: this process keeps no durable state
//! of its own. [`RecordStore`] is the seam handlers depend on; the
//! production implementation is [`SheetsStore`], and tests substitute an
//! in-memory fake through the same trait object.

pub mod config;
pub mod error;
pub mod sheets;

pub use config::SheetsConfig;
pub use error::{ConfigError, StoreError};
pub use sheets::SheetsStore;

use async_trait::async_trait;

/// Logical tables of the external store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Registrations,
    Downloads,
    Bids,
}

impl Table {
    /// All tables, in the order they are provisioned at startup.
    pub const ALL: [Table; 3] = [Table::Registrations, Table::Downloads, Table::Bids];

    /// The tab name in the backing spreadsheet.
    pub fn tab_name(self) -> &'static str {
        match self {
            Table::Registrations => "Registrations",
            Table::Downloads => "Downloads",
            Table::Bids => "Bids",
        }
    }
}

/// Append-only interface to the external tabular store.
///
/// `append` writes exactly one row and never reads, updates, or
/// deduplicates. There is no queue or retry: each append is synchronous
/// and at-least-once from the caller's perspective.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn append(&self, table: Table, row: Vec<String>) -> Result<(), StoreError>;
}
