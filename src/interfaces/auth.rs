use axum::extract::{Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    token: Option<String>,
}

/// Shared-secret gate, applied per route with that route's own secret.
///
/// An empty configured secret leaves the route open. Otherwise the `token`
/// query parameter must match the secret exactly; on mismatch or absence the
/// wrapped handler is never invoked.
pub async fn require_token(
    State(secret): State<String>,
    Query(query): Query<TokenQuery>,
    request: Request,
    next: Next,
) -> Response {
    if secret.is_empty() || query.token.as_deref() == Some(secret.as_str()) {
        return next.run(request).await;
    }

    (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
}
