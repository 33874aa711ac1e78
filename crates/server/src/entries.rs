//! Entry API endpoints.

use api_types::entry::{EntryListResponse, EntryNew, EntryView};
use axum::{Extension, Json, extract::State, http::StatusCode};
use chrono::Utc;

use crate::{ServerError, server::ServerState, user};
use ledger::{Entry, LedgerError, NewEntry, SubmitError, submit};

fn map_kind(kind: api_types::EntryKind) -> ledger::EntryKind {
    match kind {
        api_types::EntryKind::Income => ledger::EntryKind::Income,
        api_types::EntryKind::Expense => ledger::EntryKind::Expense,
    }
}

fn view_kind(kind: ledger::EntryKind) -> api_types::EntryKind {
    match kind {
        ledger::EntryKind::Income => api_types::EntryKind::Income,
        ledger::EntryKind::Expense => api_types::EntryKind::Expense,
    }
}

fn map_method(method: api_types::PaymentMethod) -> ledger::PaymentMethod {
    match method {
        api_types::PaymentMethod::PayPay => ledger::PaymentMethod::PayPay,
        api_types::PaymentMethod::Cash => ledger::PaymentMethod::Cash,
        api_types::PaymentMethod::Bank => ledger::PaymentMethod::Bank,
    }
}

fn view_method(method: ledger::PaymentMethod) -> api_types::PaymentMethod {
    match method {
        ledger::PaymentMethod::PayPay => api_types::PaymentMethod::PayPay,
        ledger::PaymentMethod::Cash => api_types::PaymentMethod::Cash,
        ledger::PaymentMethod::Bank => api_types::PaymentMethod::Bank,
    }
}

pub fn entry_view(entry: &Entry) -> EntryView {
    EntryView {
        id: entry.id,
        date: entry.date,
        method: view_method(entry.method),
        kind: view_kind(entry.kind),
        category: entry.category.clone(),
        description: entry.description.clone(),
        amount: entry.amount,
    }
}

/// Flat entry list straight from the authoritative source.
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<EntryListResponse>, ServerError> {
    let entries = state.source.list_entries().await?;
    Ok(Json(EntryListResponse {
        entries: entries.iter().map(entry_view).collect(),
    }))
}

/// Creates an entry: validate, apply optimistically to the selected month's
/// statement, then persist through the source. Admin only.
pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<EntryNew>,
) -> Result<(StatusCode, Json<EntryView>), ServerError> {
    if !user.is_admin {
        return Err(ServerError::Ledger(LedgerError::Forbidden(
            "entry creation requires the admin role".to_string(),
        )));
    }

    // A missing date defaults to today before validation runs.
    let date = payload.date.unwrap_or_else(|| Utc::now().date_naive());
    let month = payload
        .month
        .unwrap_or_else(|| date.format("%Y-%m").to_string());

    let candidate = NewEntry {
        date,
        method: map_method(payload.method),
        kind: map_kind(payload.kind),
        category: payload.category,
        description: payload.description,
        amount: payload.amount,
    };

    let mut store = state.store.write().await;

    if !store.current().iter().any(|s| {
        let prefix = month.get(..7).unwrap_or(month.as_str());
        s.month == prefix
    }) {
        // The optimistic apply is a no-op for an unknown month; the entry
        // still persists and shows up on the next refresh.
        tracing::warn!(%month, "no statement for the selected month");
    }

    match submit(&mut store, &state.source, &month, candidate, &user.username).await {
        Ok(confirmed) => Ok((StatusCode::CREATED, Json(entry_view(&confirmed)))),
        Err(SubmitError::Validation(errors)) => Err(ServerError::Validation(errors)),
        Err(SubmitError::Persist(err)) => Err(ServerError::Ledger(err)),
    }
}
