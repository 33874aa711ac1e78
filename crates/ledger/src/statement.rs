//! Monthly statement aggregation.
//!
//! A [`MonthlyStatement`] is a view over the entry set grouped by calendar
//! month. It is recomputed from scratch whenever the entry set changes; it
//! has no identity of its own and is never persisted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entry::{Entry, EntryKind};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyStatement {
    /// `YYYY-MM` key, the first 7 characters of the entries' ISO dates.
    pub month: String,
    /// Ordered by `date` descending; ties keep their relative order.
    pub entries: Vec<Entry>,
    pub total_income: i64,
    pub total_expense: i64,
    /// Always `total_income - total_expense`.
    pub balance: i64,
}

impl MonthlyStatement {
    /// Puts `entry` at the head and bumps the totals incrementally.
    ///
    /// The balance is recomputed from the two totals so it can never drift.
    pub fn prepend(&mut self, entry: Entry) {
        match entry.kind {
            EntryKind::Income => self.total_income += entry.amount,
            EntryKind::Expense => self.total_expense += entry.amount,
        }
        self.balance = self.total_income - self.total_expense;
        self.entries.insert(0, entry);
    }
}

/// Groups a flat, unordered entry collection into per-month statements.
///
/// Pure and synchronous. Statements come out month-descending; lexicographic
/// comparison is correct for `YYYY-MM` keys, so no date parsing happens here.
/// Empty input yields empty output.
pub fn aggregate(entries: &[Entry]) -> Vec<MonthlyStatement> {
    let mut groups: BTreeMap<String, Vec<Entry>> = BTreeMap::new();
    for entry in entries {
        groups
            .entry(entry.month_key())
            .or_default()
            .push(entry.clone());
    }

    groups
        .into_iter()
        .rev()
        .map(|(month, mut entries)| {
            entries.sort_by(|a, b| b.date.cmp(&a.date));
            let total_income: i64 = entries
                .iter()
                .filter(|e| e.kind == EntryKind::Income)
                .map(|e| e.amount)
                .sum();
            let total_expense: i64 = entries
                .iter()
                .filter(|e| e.kind == EntryKind::Expense)
                .map(|e| e.amount)
                .sum();
            MonthlyStatement {
                month,
                entries,
                total_income,
                total_expense,
                balance: total_income - total_expense,
            }
        })
        .collect()
}
