use axum::{Json, http::StatusCode, response::IntoResponse};
use ledger::{LedgerError, ValidationErrors};

use serde::Serialize;
pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod categories;
mod entries;
mod server;
mod statements;
mod user;

pub mod types {
    pub mod entry {
        pub use api_types::entry::{EntryListResponse, EntryNew, EntryView, ValidationResponse};
    }

    pub mod statement {
        pub use api_types::statement::{StatementView, StatementsResponse};
        pub use ledger::MonthlyStatement;
    }

    pub mod user {
        pub use api_types::user::MemberView;
    }
}

pub enum ServerError {
    Ledger(LedgerError),
    Validation(ValidationErrors),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_ledger_error(err: &LedgerError) -> StatusCode {
    match err {
        LedgerError::Forbidden(_) => StatusCode::FORBIDDEN,
        LedgerError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        LedgerError::SourceUnavailable(_) => StatusCode::BAD_GATEWAY,
        LedgerError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        LedgerError::InvalidAmount(_) | LedgerError::InvalidField(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

fn message_for_ledger_error(err: LedgerError) -> String {
    match err {
        LedgerError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ServerError::Ledger(err) => {
                let status = status_for_ledger_error(&err);
                let error = message_for_ledger_error(err);
                (status, Json(Error { error })).into_response()
            }
            ServerError::Validation(errors) => {
                let fields = errors
                    .fields
                    .iter()
                    .map(|(field, kind)| (field.to_string(), kind.as_str().to_string()))
                    .collect();
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(types::entry::ValidationResponse { fields }),
                )
                    .into_response()
            }
            ServerError::Generic(error) => {
                (StatusCode::BAD_REQUEST, Json(Error { error })).into_response()
            }
        }
    }
}

impl From<LedgerError> for ServerError {
    fn from(value: LedgerError) -> Self {
        Self::Ledger(value)
    }
}

#[cfg(test)]
mod tests {
    use ledger::ValidationKind;

    use super::*;

    #[test]
    fn ledger_forbidden_maps_to_403() {
        let res = ServerError::from(LedgerError::Forbidden("forbidden".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn ledger_not_found_maps_to_404() {
        let res = ServerError::from(LedgerError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn source_failure_maps_to_502() {
        let res =
            ServerError::from(LedgerError::SourceUnavailable("down".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn ledger_invalid_amount_maps_to_422() {
        let res = ServerError::from(LedgerError::InvalidAmount("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn validation_errors_map_to_422() {
        let mut errors = ValidationErrors::default();
        errors
            .fields
            .insert("amount", ValidationKind::AmountMustBePositive);
        let res = ServerError::Validation(errors).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
