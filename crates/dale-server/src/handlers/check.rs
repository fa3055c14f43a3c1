//! `/check`: auth subrequest target for reverse proxies.

use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use dale_auth::{AccessDecision, SESSION_COOKIE, bearer_token, decide, find_cookie, now_unix};

use crate::error::GateError;
use crate::state::AppState;

/// Response header carrying the resolved identity.
pub const X_USER: HeaderName = HeaderName::from_static("x-user");

/// GET (or any method) /check
///
/// `200` with `X-User` when the session cookie or bearer token is valid,
/// otherwise `401 Unauthorized` with no further detail.
pub async fn check(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let cookie_token = session_cookie(&headers);
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let now = now_unix();

    let decision = decide(cookie_token, authorization, &state.signer, now);
    if let Some(response) = allow_response(&decision) {
        tracing::debug!(source = ?decision.source, "check allowed");
        return response;
    }

    if tracing::enabled!(tracing::Level::DEBUG) {
        let cookie_reason = cookie_token.map(|t| state.signer.check_at(t, now));
        let bearer_reason = authorization
            .and_then(bearer_token)
            .map(|t| state.signer.check_at(t, now));
        tracing::debug!(?cookie_reason, ?bearer_reason, "check denied");
    }

    GateError::Unauthorized.into_response()
}

fn allow_response(decision: &AccessDecision) -> Option<Response> {
    let identity = decision.identity.as_deref()?;
    let value = HeaderValue::from_bytes(identity.as_bytes()).ok()?;
    Some((StatusCode::OK, [(X_USER, value)]).into_response())
}

/// First `session` cookie across all `Cookie` headers.
fn session_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|v| find_cookie(v, SESSION_COOKIE))
}
