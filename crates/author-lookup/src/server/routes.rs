//! Routes and handlers of the JSON API.
//!
//! | Method | Path                               | Step                       |
//! |--------|------------------------------------|----------------------------|
//! | GET    | `/api/authors?name=`               | search → candidates        |
//! | POST   | `/api/session`                     | select a candidate         |
//! | GET    | `/api/session/{id}`                | read the selection         |
//! | GET    | `/api/session/{id}/publications`   | publications + chart data  |
//! | GET    | `/api/works/{*doi}`                | single work by DOI         |

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::{ClientError, LookupError};
use crate::formatters;
use crate::lookup::AuthorLookup;
use crate::models::AuthorSummary;
use crate::session::SessionStore;

/// Shared state for HTTP handlers.
#[derive(Debug)]
pub struct HttpState {
    pub lookup: AuthorLookup,
    pub sessions: Arc<SessionStore>,
}

/// Query parameters for the author search.
#[derive(Debug, Deserialize)]
pub struct AuthorQuery {
    #[serde(default)]
    name: String,
}

/// Body of a selection request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectRequest {
    /// Existing session to overwrite; a new one is minted when absent.
    #[serde(default)]
    session_id: Option<String>,
    author: AuthorSummary,
}

/// [`LookupError`] rendered as a JSON error response.
#[derive(Debug)]
pub struct ApiError(LookupError);

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            LookupError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            LookupError::NoSelection => StatusCode::NOT_FOUND,
            LookupError::Client(ClientError::NotFound { .. }) => StatusCode::NOT_FOUND,
            LookupError::Client(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }

        let mut body = json!({ "error": self.0.to_user_message() });
        if matches!(self.0, LookupError::NoSelection) {
            body["redirect"] = json!("/");
        }

        (status, Json(body)).into_response()
    }
}

/// Create the HTTP router.
pub fn create_router(lookup: AuthorLookup, sessions: Arc<SessionStore>) -> Router {
    let state = Arc::new(HttpState { lookup, sessions });

    Router::new()
        .route("/health", get(health_check))
        .route("/api/authors", get(search_authors))
        .route("/api/session", post(select_author))
        .route("/api/session/{id}", get(selected_author))
        .route("/api/session/{id}/publications", get(author_publications))
        .route("/api/works/{*doi}", get(get_work))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "author-lookup",
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": state.sessions.len().await,
    }))
}

async fn search_authors(
    State(state): State<Arc<HttpState>>,
    Query(query): Query<AuthorQuery>,
) -> Result<Json<Value>, ApiError> {
    let authors = state.lookup.find_candidates(&query.name).await?;
    Ok(Json(formatters::candidates_json(&authors)))
}

async fn select_author(
    State(state): State<Arc<HttpState>>,
    Json(req): Json<SelectRequest>,
) -> impl IntoResponse {
    let id = state.sessions.select(req.session_id, req.author).await;
    (StatusCode::CREATED, Json(json!({ "sessionId": id })))
}

async fn selected_author(
    State(state): State<Arc<HttpState>>,
    Path(id): Path<String>,
) -> Result<Json<AuthorSummary>, ApiError> {
    Ok(Json(state.sessions.selected(&id).await?))
}

async fn author_publications(
    State(state): State<Arc<HttpState>>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let author = state.sessions.selected(&id).await?;
    let result = state.lookup.publications(&author).await?;
    Ok(Json(formatters::publications_json(&result)))
}

async fn get_work(
    State(state): State<Arc<HttpState>>,
    Path(doi): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let work = state.lookup.work(&doi).await?;
    Ok(Json(formatters::compact_work(&work)))
}
