use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{categories, entries, statements, user};
use ledger::{DataSource, StatementStore};

#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<RwLock<StatementStore>>,
    pub source: Arc<DataSource>,
    pub db: DatabaseConnection,
}

impl ServerState {
    pub fn new(source: DataSource, db: DatabaseConnection) -> Self {
        Self {
            store: Arc::new(RwLock::new(StatementStore::new())),
            source: Arc::new(source),
            db,
        }
    }
}

async fn auth(
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(auth_header) = auth_header else {
        return Err(StatusCode::UNAUTHORIZED);
    };
    if auth_header.username().is_empty() || auth_header.password().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let user: Option<user::Model> = user::Entity::find()
        .filter(user::Column::Username.eq(auth_header.username()))
        .filter(user::Column::Password.eq(auth_header.password()))
        .one(&state.db)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let Some(user) = user else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/statements", get(statements::list))
        .route("/statements/refresh", post(statements::refresh))
        .route("/entries", get(entries::list).post(entries::create))
        .route("/categories", get(categories::list))
        .route("/user/me", get(user::me))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .with_state(state)
}

pub async fn run(source: DataSource, db: DatabaseConnection) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(source, db, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    source: DataSource,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState::new(source, db);

    // Best-effort initial load; the baseline stays empty if the source is
    // down and callers refresh later.
    if let Err(err) = state.store.write().await.refresh(&state.source).await {
        tracing::warn!("initial statement load failed: {err}");
    }

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    source: DataSource,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(source, db, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
