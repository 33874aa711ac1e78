//! Entry mutation service: validation, optimistic apply, submission.
//!
//! A submission runs validate → optimistic apply → persist. The optimistic
//! step installs a full replacement statement list on the store before the
//! source confirms the write, so readers stay responsive. On persist failure
//! the override is kept, unconfirmed (no rollback; see DESIGN.md).

use crate::entry::{Entry, NewEntry};
use crate::error::{LedgerError, ValidationErrors, ValidationKind};
use crate::source::DataSource;
use crate::statement::MonthlyStatement;
use crate::store::StatementStore;

/// Checks a candidate entry. Every failing field is reported, not just the
/// first one. A syntactically invalid date never reaches this point: the
/// typed `NaiveDate` is parsed at the boundary, and a missing date is
/// defaulted to today there as well.
pub fn validate(candidate: &NewEntry) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    if candidate.description.trim().is_empty() {
        errors.push("description", ValidationKind::DescriptionRequired);
    }
    if candidate.amount <= 0 {
        errors.push("amount", ValidationKind::AmountMustBePositive);
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Produces a new statement list with `entry` inserted into the statement
/// selected by `target_month` (its `YYYY-MM` prefix).
///
/// The target is the *caller-selected* month, which may differ from the
/// month of the entry's own date; the entry lands in the selected statement
/// regardless. If no statement exists for that month the list is returned
/// unchanged. Both behaviors are carried over from the system this
/// reimplements and are flagged in DESIGN.md rather than corrected here.
///
/// The input is never mutated; callers can compare lists for change
/// detection.
pub fn apply_optimistic(
    statements: &[MonthlyStatement],
    target_month: &str,
    entry: Entry,
) -> Vec<MonthlyStatement> {
    let month = target_month.get(..7).unwrap_or(target_month);
    let mut next = statements.to_vec();
    if let Some(statement) = next.iter_mut().find(|s| s.month == month) {
        statement.prepend(entry);
    }
    next
}

#[derive(Debug, PartialEq)]
pub enum SubmitError {
    /// Field-scoped, recovered locally; the submission never reached the
    /// optimistic step.
    Validation(ValidationErrors),
    /// The authoritative write failed after the optimistic apply. The
    /// store keeps the unconfirmed override.
    Persist(LedgerError),
}

/// Runs one submission against the store and the authoritative source.
///
/// State machine: validate fails → `Validation` (store untouched); persist
/// fails → `Persist` (unconfirmed override remains); otherwise the override
/// is marked confirmed and the server-confirmed entry is returned.
pub async fn submit(
    store: &mut StatementStore,
    source: &DataSource,
    target_month: &str,
    candidate: NewEntry,
    created_by: &str,
) -> Result<Entry, SubmitError> {
    validate(&candidate).map_err(SubmitError::Validation)?;

    // Provisional copy with a locally assigned id; the source assigns the
    // authoritative one.
    let provisional = Entry::new(candidate.clone()).map_err(SubmitError::Persist)?;
    let next = apply_optimistic(store.current(), target_month, provisional);
    store.set_override(next);

    match source.create_entry(candidate, created_by).await {
        Ok(confirmed) => {
            store.confirm_override();
            Ok(confirmed)
        }
        Err(err) => Err(SubmitError::Persist(err)),
    }
}
