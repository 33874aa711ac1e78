//! Ledger entry primitives.
//!
//! An `Entry` is one income or expense movement of the house ledger. The
//! direction is carried by [`EntryKind`], never by the sign of `amount`.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{LedgerError, ResultLedger};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl TryFrom<&str> for EntryKind {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(LedgerError::InvalidField(format!(
                "invalid entry kind: {other}"
            ))),
        }
    }
}

/// How the money moved. Open to extension (`bank` was added after the
/// first two).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[serde(rename = "paypay")]
    PayPay,
    Cash,
    Bank,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PayPay => "paypay",
            Self::Cash => "cash",
            Self::Bank => "bank",
        }
    }
}

impl TryFrom<&str> for PaymentMethod {
    type Error = LedgerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "paypay" => Ok(Self::PayPay),
            "cash" => Ok(Self::Cash),
            "bank" => Ok(Self::Bank),
            other => Err(LedgerError::InvalidField(format!(
                "invalid payment method: {other}"
            ))),
        }
    }
}

/// A candidate entry, before the authoritative source assigned an id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEntry {
    /// Accounting date, not creation timestamp.
    pub date: NaiveDate,
    pub method: PaymentMethod,
    pub kind: EntryKind,
    pub category: String,
    pub description: String,
    /// Whole yen, strictly positive.
    pub amount: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub method: PaymentMethod,
    pub kind: EntryKind,
    pub category: String,
    pub description: String,
    pub amount: i64,
}

impl Entry {
    /// Builds an entry with a locally assigned id.
    ///
    /// The `amount > 0` invariant is enforced here; everything else is the
    /// mutation service's concern.
    pub fn new(candidate: NewEntry) -> ResultLedger<Self> {
        if candidate.amount <= 0 {
            return Err(LedgerError::InvalidAmount(
                "amount must be > 0".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            date: candidate.date,
            method: candidate.method,
            kind: candidate.kind,
            category: candidate.category,
            description: candidate.description,
            amount: candidate.amount,
        })
    }

    /// The `YYYY-MM` statement key this entry belongs to.
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub date: Date,
    pub method: String,
    pub kind: String,
    pub category: String,
    pub description: String,
    pub amount: i64,
    pub created_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Entry> for ActiveModel {
    fn from(entry: &Entry) -> Self {
        Self {
            id: ActiveValue::Set(entry.id.to_string()),
            date: ActiveValue::Set(entry.date),
            method: ActiveValue::Set(entry.method.as_str().to_string()),
            kind: ActiveValue::Set(entry.kind.as_str().to_string()),
            category: ActiveValue::Set(entry.category.clone()),
            description: ActiveValue::Set(entry.description.clone()),
            amount: ActiveValue::Set(entry.amount),
            created_by: ActiveValue::NotSet,
        }
    }
}

impl TryFrom<Model> for Entry {
    type Error = LedgerError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Uuid::parse_str(&model.id)
                .map_err(|_| LedgerError::InvalidField(format!("invalid entry id: {}", model.id)))?,
            date: model.date,
            method: PaymentMethod::try_from(model.method.as_str())?,
            kind: EntryKind::try_from(model.kind.as_str())?,
            category: model.category,
            description: model.description,
            amount: model.amount,
        })
    }
}
