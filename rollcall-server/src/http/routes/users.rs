//! Submission and listing endpoints
//!
//! POST /submit accepts the form (urlencoded or JSON), validates, and
//! inserts. GET /users returns a page of records newest-first with
//! pagination metadata.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header::{HeaderMap, ACCEPT};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::db::UserRepo;
use crate::http::error::ApiError;
use crate::http::extract::FormOrJson;
use crate::http::server::AppState;
use crate::models::{NewUser, PageMeta, PaginationParams, User};

/// Raw submission payload, before validation.
///
/// Every field is optional here so absence surfaces as a validation
/// error with a `missing` map, not a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub name: Option<String>,
    /// Accepts a JSON number or a string; the form always sends strings
    #[serde(default, deserialize_with = "age_as_string")]
    pub age: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

/// Deserialize `age` from either a string or a number into its string
/// form; range and integer checks happen in validation with the rest.
fn age_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
        Raw::Text(s) => s,
    }))
}

/// GET /users response
#[derive(Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
    pub pagination: PageMeta,
}

/// Whether the client asked for an HTML response. Browsers submitting
/// the form send Accept: text/html; API clients ask for JSON or */*.
fn wants_html(headers: &HeaderMap) -> bool {
    headers
        .get(ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|accept| accept.contains("text/html"))
        .unwrap_or(false)
}

/// Confirmation fragment rendered after a successful form submit.
fn confirmation_html(user: &User) -> String {
    format!(
        "<h2>User added successfully!</h2>\n\
         <p>{} ({}), {} &mdash; record #{}</p>\n\
         <p><a href=\"/\">Go back to form</a></p>\n",
        escape(&user.name),
        user.age,
        escape(&user.city),
        user.id
    )
}

/// Minimal HTML escaping for user-supplied text in the fragment.
fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// POST /submit - validate and persist one record
async fn submit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    FormOrJson(req): FormOrJson<SubmitRequest>,
) -> Result<Response, ApiError> {
    let new_user = NewUser::parse(req.name.as_deref(), req.age.as_deref(), req.city.as_deref())?;

    let user = UserRepo::new(state.pool())
        .insert(&new_user)
        .await
        .map_err(|e| state.db_error(e))?;

    tracing::info!(id = user.id, "user record created");

    let response = if wants_html(&headers) {
        (StatusCode::CREATED, Html(confirmation_html(&user))).into_response()
    } else {
        (
            StatusCode::CREATED,
            Json(json!({ "success": true, "user": user })),
        )
            .into_response()
    };
    Ok(response)
}

/// GET /users - paginated listing, newest first
async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<UsersResponse>, ApiError> {
    let page = params.into();
    let result = UserRepo::new(state.pool())
        .list(page)
        .await
        .map_err(|e| state.db_error(e))?;

    let pagination = result.meta();
    Ok(Json(UsersResponse {
        users: result.items,
        pagination,
    }))
}

/// Submission routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/submit", post(submit))
        .route("/users", get(list_users))
}
