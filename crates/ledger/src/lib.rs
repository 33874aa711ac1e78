//! Core of the share-house ledger: entries, monthly statement aggregation,
//! the session statement store with optimistic local mutation, and the
//! mock/live data-source toggle.
//!
//! Aggregation, validation and optimistic apply are pure and synchronous;
//! the only suspension points are the source's `list`/`create` operations.

pub use categories::{CategoryLabels, Locale, labels};
pub use entry::{Entry, EntryKind, NewEntry, PaymentMethod};
pub use error::{LedgerError, ValidationErrors, ValidationKind};
pub use mutation::{SubmitError, apply_optimistic, submit, validate};
pub use source::{DataSource, DbSource, MockSource};
pub use statement::{MonthlyStatement, aggregate};
pub use store::{LoadGeneration, LocalOverride, StatementStore};

mod categories;
mod entry;
mod error;
mod mutation;
mod source;
mod statement;
mod store;

pub type ResultLedger<T> = Result<T, LedgerError>;
