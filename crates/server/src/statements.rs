//! Statement API endpoints.

use api_types::statement::{StatementView, StatementsResponse};
use axum::{Json, extract::State};

use crate::{ServerError, entries::entry_view, server::ServerState};
use ledger::MonthlyStatement;

fn statement_view(statement: &MonthlyStatement) -> StatementView {
    StatementView {
        month: statement.month.clone(),
        entries: statement.entries.iter().map(entry_view).collect(),
        total_income: statement.total_income,
        total_expense: statement.total_expense,
        balance: statement.balance,
    }
}

/// Returns the store's current view: the local override while one is
/// present, the baseline otherwise.
pub async fn list(State(state): State<ServerState>) -> Json<StatementsResponse> {
    let store = state.store.read().await;
    Json(StatementsResponse {
        statements: store.current().iter().map(statement_view).collect(),
        unconfirmed: store.has_unconfirmed_override(),
    })
}

/// Reloads the baseline from the authoritative source.
///
/// On failure the previous baseline stays in place and the error is
/// surfaced; nothing retries here.
pub async fn refresh(
    State(state): State<ServerState>,
) -> Result<Json<StatementsResponse>, ServerError> {
    let mut store = state.store.write().await;
    let statements = store.refresh(&state.source).await?;
    let statements = statements.iter().map(statement_view).collect();
    Ok(Json(StatementsResponse {
        statements,
        unconfirmed: store.has_unconfirmed_override(),
    }))
}
