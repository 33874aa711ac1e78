//! Category label endpoint.

use axum::{Json, extract::Query};
use serde::Deserialize;

use ledger::{CategoryLabels, Locale, labels};

#[derive(Debug, Deserialize)]
pub struct LabelParams {
    #[serde(default)]
    locale: Locale,
}

/// The bounded category label set for the requested locale (`ja` default).
pub async fn list(Query(params): Query<LabelParams>) -> Json<&'static CategoryLabels> {
    Json(labels(params.locale))
}
