//! Authoritative data sources: the mock/live toggle.
//!
//! The aggregator and the store see the same `Entry` shape from either
//! variant; which one is active is a deployment decision made in the app's
//! settings, invisible to the core logic.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, EntityTrait, QueryOrder};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::entry::{self, Entry, EntryKind, NewEntry, PaymentMethod};
use crate::{LedgerError, ResultLedger};

pub enum DataSource {
    Mock(MockSource),
    Database(DbSource),
}

impl DataSource {
    /// Fetches the full entry list, newest accounting date first.
    pub async fn list_entries(&self) -> ResultLedger<Vec<Entry>> {
        match self {
            Self::Mock(source) => source.list_entries().await,
            Self::Database(source) => source.list_entries().await,
        }
    }

    /// Persists a candidate and returns the stored entry with its
    /// source-assigned id.
    pub async fn create_entry(
        &self,
        candidate: NewEntry,
        created_by: &str,
    ) -> ResultLedger<Entry> {
        match self {
            Self::Mock(source) => source.create_entry(candidate).await,
            Self::Database(source) => source.create_entry(candidate, created_by).await,
        }
    }
}

/// Static fixture source for mock mode.
///
/// `unavailable` simulates an outage: both operations fail with
/// [`LedgerError::SourceUnavailable`] while it is set, which is how the
/// load/persist failure paths are rehearsed without a backend.
pub struct MockSource {
    entries: Mutex<Vec<Entry>>,
    unavailable: AtomicBool,
}

impl MockSource {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            unavailable: AtomicBool::new(false),
        }
    }

    /// A plausible two-month slice of a share-house ledger.
    pub fn with_fixture() -> Self {
        fn seed(
            date: (i32, u32, u32),
            method: PaymentMethod,
            kind: EntryKind,
            category: &str,
            description: &str,
            amount: i64,
        ) -> Option<Entry> {
            Some(Entry {
                id: Uuid::new_v4(),
                date: NaiveDate::from_ymd_opt(date.0, date.1, date.2)?,
                method,
                kind,
                category: category.to_string(),
                description: description.to_string(),
                amount,
            })
        }

        let entries = [
            seed(
                (2024, 11, 1),
                PaymentMethod::Bank,
                EntryKind::Income,
                "rent",
                "November common fee",
                3200,
            ),
            seed(
                (2024, 11, 6),
                PaymentMethod::PayPay,
                EntryKind::Expense,
                "utilities",
                "Electricity bill",
                1200,
            ),
            seed(
                (2024, 11, 18),
                PaymentMethod::Cash,
                EntryKind::Expense,
                "supplies",
                "Kitchen sponges and soap",
                460,
            ),
            seed(
                (2024, 12, 1),
                PaymentMethod::Bank,
                EntryKind::Income,
                "rent",
                "December common fee",
                3500,
            ),
            seed(
                (2024, 12, 9),
                PaymentMethod::PayPay,
                EntryKind::Expense,
                "event",
                "Year-end party groceries",
                2100,
            ),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::new(entries)
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> ResultLedger<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(LedgerError::SourceUnavailable(
                "mock source is unavailable".to_string(),
            ));
        }
        Ok(())
    }

    async fn list_entries(&self) -> ResultLedger<Vec<Entry>> {
        self.check_available()?;
        let mut entries = self.entries.lock().await.clone();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(entries)
    }

    async fn create_entry(&self, candidate: NewEntry) -> ResultLedger<Entry> {
        self.check_available()?;
        let entry = Entry::new(candidate)?;
        self.entries.lock().await.push(entry.clone());
        Ok(entry)
    }
}

/// Live source over the `entries` table.
pub struct DbSource {
    database: DatabaseConnection,
}

impl DbSource {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }

    async fn list_entries(&self) -> ResultLedger<Vec<Entry>> {
        let models = entry::Entity::find()
            .order_by_desc(entry::Column::Date)
            .all(&self.database)
            .await?;

        let mut entries = Vec::with_capacity(models.len());
        for model in models {
            entries.push(Entry::try_from(model)?);
        }
        Ok(entries)
    }

    async fn create_entry(&self, candidate: NewEntry, created_by: &str) -> ResultLedger<Entry> {
        let entry = Entry::new(candidate)?;
        let mut model = entry::ActiveModel::from(&entry);
        model.created_by = ActiveValue::Set(created_by.to_string());
        model.insert(&self.database).await?;
        Ok(entry)
    }
}
