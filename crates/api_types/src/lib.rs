use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Income,
    Expense,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[serde(rename = "paypay")]
    PayPay,
    Cash,
    Bank,
}

pub mod entry {
    use super::*;

    /// Request body for creating a ledger entry.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct EntryNew {
        /// Accounting date (ISO 8601, no time component). If absent the
        /// server fills in today before validating.
        pub date: Option<NaiveDate>,
        pub method: PaymentMethod,
        pub kind: EntryKind,
        pub category: String,
        pub description: String,
        /// Whole yen; must be > 0.
        pub amount: i64,
        /// The month statement currently selected in the UI (`YYYY-MM` or a
        /// full date; only the 7-char prefix matters). Defaults to the
        /// month of `date`.
        pub month: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EntryView {
        pub id: Uuid,
        pub date: NaiveDate,
        pub method: PaymentMethod,
        pub kind: EntryKind,
        pub category: String,
        pub description: String,
        pub amount: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct EntryListResponse {
        pub entries: Vec<EntryView>,
    }

    /// `422` body: every failing field with its error kind.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ValidationResponse {
        pub fields: BTreeMap<String, String>,
    }
}

pub mod statement {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StatementView {
        pub month: String,
        pub entries: Vec<entry::EntryView>,
        pub total_income: i64,
        pub total_expense: i64,
        pub balance: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StatementsResponse {
        pub statements: Vec<StatementView>,
        /// True while the list reflects a local edit the authoritative
        /// source has not confirmed yet.
        pub unconfirmed: bool,
    }
}

pub mod user {
    use super::*;

    /// The authenticated member's directory card.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberView {
        pub username: String,
        pub display_name: Option<String>,
        pub is_admin: bool,
    }
}
