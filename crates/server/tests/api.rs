use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::Engine;
use http_body_util::BodyExt;
use sea_orm::{ConnectionTrait, Database, Statement};
use tower::ServiceExt;

use ledger::{DataSource, MockSource};
use migration::MigratorTrait;
use server::ServerState;

async fn test_state() -> ServerState {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO users (username, password, is_admin) VALUES (?, ?, ?)",
        vec!["alice".into(), "password".into(), true.into()],
    ))
    .await
    .unwrap();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO users (username, password, is_admin) VALUES (?, ?, ?)",
        vec!["bob".into(), "password".into(), false.into()],
    ))
    .await
    .unwrap();

    let source = DataSource::Mock(MockSource::with_fixture());
    let state = ServerState::new(source, db);
    state
        .store
        .write()
        .await
        .refresh(&state.source)
        .await
        .unwrap();
    state
}

async fn test_router() -> (Router, ServerState) {
    let state = test_state().await;
    (server::router(state.clone()), state)
}

fn basic_auth(username: &str) -> String {
    let token = base64::engine::general_purpose::STANDARD.encode(format!("{username}:password"));
    format!("Basic {token}")
}

fn get(uri: &str, username: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, basic_auth(username))
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, username: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, basic_auth(username))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(res: axum::response::Response) -> serde_json::Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn requests_without_credentials_are_rejected() {
    let (router, _state) = test_router().await;
    let res = router
        .oneshot(
            Request::builder()
                .uri("/statements")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn statements_list_returns_the_aggregated_fixture() {
    let (router, _state) = test_router().await;
    let res = router.oneshot(get("/statements", "bob")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = json_body(res).await;
    let statements = body["statements"].as_array().unwrap();
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0]["month"], "2024-12");
    assert_eq!(statements[1]["month"], "2024-11");
    assert_eq!(
        statements[1]["balance"],
        statements[1]["total_income"].as_i64().unwrap()
            - statements[1]["total_expense"].as_i64().unwrap()
    );
}

#[tokio::test]
async fn admin_can_create_an_entry_and_statements_update() {
    let (router, _state) = test_router().await;

    let res = router
        .clone()
        .oneshot(post_json(
            "/entries",
            "alice",
            serde_json::json!({
                "date": "2024-12-05",
                "method": "paypay",
                "kind": "expense",
                "category": "supplies",
                "description": "cleaning supplies",
                "amount": 1800,
                "month": "2024-12"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = router.oneshot(get("/statements", "alice")).await.unwrap();
    let body = json_body(res).await;
    let december = &body["statements"][0];
    assert_eq!(december["month"], "2024-12");
    assert_eq!(december["total_expense"], 2100 + 1800);
    assert_eq!(december["entries"][0]["description"], "cleaning supplies");
}

#[tokio::test]
async fn missing_date_defaults_to_today() {
    let (router, _state) = test_router().await;

    let res = router
        .clone()
        .oneshot(post_json(
            "/entries",
            "alice",
            serde_json::json!({
                "method": "cash",
                "kind": "expense",
                "category": "supplies",
                "description": "replacement lightbulbs",
                "amount": 300
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let today = chrono::Utc::now().date_naive();
    let body = json_body(res).await;
    assert_eq!(body["date"], today.to_string());

    // The fixture has no statement for the current month, so the entry only
    // shows up once the baseline is reloaded from the source.
    let res = router
        .clone()
        .oneshot(post_json(
            "/statements/refresh",
            "alice",
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = router.oneshot(get("/statements", "alice")).await.unwrap();
    let body = json_body(res).await;
    let month = today.format("%Y-%m").to_string();
    let statement = body["statements"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["month"] == month.as_str())
        .unwrap();
    assert!(
        statement["entries"]
            .as_array()
            .unwrap()
            .iter()
            .any(|e| e["description"] == "replacement lightbulbs")
    );
}

#[tokio::test]
async fn non_admin_cannot_create_entries() {
    let (router, _state) = test_router().await;
    let res = router
        .oneshot(post_json(
            "/entries",
            "bob",
            serde_json::json!({
                "date": "2024-12-05",
                "method": "cash",
                "kind": "expense",
                "category": "supplies",
                "description": "x",
                "amount": 100
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn invalid_entry_reports_every_failing_field() {
    let (router, _state) = test_router().await;
    let res = router
        .oneshot(post_json(
            "/entries",
            "alice",
            serde_json::json!({
                "date": "2024-12-05",
                "method": "cash",
                "kind": "expense",
                "category": "supplies",
                "description": "   ",
                "amount": 0
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_body(res).await;
    assert_eq!(body["fields"]["description"], "description_required");
    assert_eq!(body["fields"]["amount"], "amount_must_be_positive");
}

#[tokio::test]
async fn refresh_surfaces_a_source_outage_and_keeps_the_baseline() {
    let (router, state) = test_router().await;

    if let DataSource::Mock(mock) = state.source.as_ref() {
        mock.set_unavailable(true);
    }

    let res = router
        .clone()
        .oneshot(post_json(
            "/statements/refresh",
            "alice",
            serde_json::json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);

    // The previous baseline is still served.
    let res = router.oneshot(get("/statements", "alice")).await.unwrap();
    let body = json_body(res).await;
    assert_eq!(body["statements"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn category_labels_follow_the_requested_locale() {
    let (router, _state) = test_router().await;

    let res = router
        .clone()
        .oneshot(get("/categories", "bob"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = json_body(res).await;
    assert_eq!(body["utilities"], "光熱費");

    let res = router
        .oneshot(get("/categories?locale=en", "bob"))
        .await
        .unwrap();
    let body = json_body(res).await;
    assert_eq!(body["utilities"], "Utilities");
}

#[tokio::test]
async fn me_returns_the_member_card() {
    let (router, _state) = test_router().await;
    let res = router.oneshot(get("/user/me", "alice")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body = json_body(res).await;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["is_admin"], true);
}
