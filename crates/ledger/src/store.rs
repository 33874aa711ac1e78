//! The session statement store.
//!
//! The store owns the current aggregated view: a `baseline` obtained from
//! the authoritative source, plus an optional local override produced by an
//! optimistic mutation. Reads always see the override while it is present.
//!
//! Loads are tagged with a monotonically increasing generation so that a
//! slow fetch resolving after a newer one cannot clobber fresher data.

use crate::entry::Entry;
use crate::source::DataSource;
use crate::statement::{MonthlyStatement, aggregate};
use crate::ResultLedger;

/// Ticket for one in-flight load. Obtained from [`StatementStore::begin_load`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadGeneration(u64);

/// A full replacement statement list produced by a local mutation.
///
/// `confirmed` tracks whether the authoritative source has acknowledged the
/// write that produced it. An unconfirmed override is kept on persist
/// failure (no rollback), but stays distinguishable from confirmed data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalOverride {
    pub statements: Vec<MonthlyStatement>,
    pub confirmed: bool,
}

#[derive(Debug, Default)]
pub struct StatementStore {
    baseline: Vec<MonthlyStatement>,
    local_override: Option<LocalOverride>,
    issued: u64,
}

impl StatementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The statements a reader should see right now: the local override if
    /// one is present, the baseline otherwise.
    pub fn current(&self) -> &[MonthlyStatement] {
        match &self.local_override {
            Some(local) => &local.statements,
            None => &self.baseline,
        }
    }

    pub fn has_unconfirmed_override(&self) -> bool {
        matches!(
            self.local_override,
            Some(LocalOverride {
                confirmed: false,
                ..
            })
        )
    }

    /// Starts a load and returns its generation tag.
    pub fn begin_load(&mut self) -> LoadGeneration {
        self.issued += 1;
        LoadGeneration(self.issued)
    }

    /// Completes a load started with [`begin_load`](Self::begin_load).
    ///
    /// A result whose generation is not the latest issued is discarded,
    /// whatever its outcome. A fetch error leaves the baseline at its
    /// previous value (possibly empty on first load) and is returned to the
    /// caller; no retry happens here. A successful fetch replaces the
    /// baseline and clears any local override, which is assumed to be either
    /// reflected upstream already or stale.
    ///
    /// Returns whether the result was applied.
    pub fn apply_load(
        &mut self,
        generation: LoadGeneration,
        result: ResultLedger<Vec<Entry>>,
    ) -> ResultLedger<bool> {
        if generation.0 != self.issued {
            tracing::debug!(
                generation = generation.0,
                latest = self.issued,
                "discarding stale load result"
            );
            return Ok(false);
        }

        let entries = result?;
        self.baseline = aggregate(&entries);
        self.local_override = None;
        Ok(true)
    }

    /// Begin-fetch-apply in one call.
    pub async fn refresh(&mut self, source: &DataSource) -> ResultLedger<&[MonthlyStatement]> {
        let generation = self.begin_load();
        let result = source.list_entries().await;
        self.apply_load(generation, result)?;
        Ok(self.current())
    }

    /// Installs an unconfirmed local override.
    pub fn set_override(&mut self, statements: Vec<MonthlyStatement>) {
        self.local_override = Some(LocalOverride {
            statements,
            confirmed: false,
        });
    }

    /// Marks the current override as acknowledged by the source.
    pub fn confirm_override(&mut self) {
        if let Some(local) = &mut self.local_override {
            local.confirmed = true;
        }
    }
}

impl StatementStore {
    /// Builds a store whose baseline is aggregated from `entries` directly,
    /// without going through a source. Used at startup and in tests.
    pub fn with_baseline(entries: &[Entry]) -> Self {
        Self {
            baseline: aggregate(entries),
            local_override: None,
            issued: 0,
        }
    }
}
