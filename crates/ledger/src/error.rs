//! The module contains the errors the ledger can return.
//!
//! [`LedgerError`] covers lookups, entity invariants and source failures and
//! propagates with `?`. Field validation is different: the mutation service
//! returns [`ValidationErrors`] as plain data so callers can surface every
//! failing field at once instead of catching an exception-like value.

use std::collections::BTreeMap;

use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ledger custom errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid field: {0}")]
    InvalidField(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for LedgerError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidField(a), Self::InvalidField(b)) => a == b,
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            (Self::SourceUnavailable(a), Self::SourceUnavailable(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

/// What went wrong with a single candidate field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationKind {
    DescriptionRequired,
    AmountMustBePositive,
}

impl ValidationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DescriptionRequired => "description_required",
            Self::AmountMustBePositive => "amount_must_be_positive",
        }
    }
}

/// Per-field validation outcome, keyed by field name.
///
/// Multiple fields may fail at once; all of them are reported.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    pub fields: BTreeMap<&'static str, ValidationKind>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn push(&mut self, field: &'static str, kind: ValidationKind) {
        self.fields.insert(field, kind);
    }
}
