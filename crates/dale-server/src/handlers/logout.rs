//! Logout: drop the session cookie.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Response;

use dale_auth::build_clear_cookie;

use super::{Pairs, Params, found_with_cookie, redirect_target};
use crate::error::GateResult;
use crate::state::AppState;

/// Any method /auth/logout
///
/// Bearer tokens already handed out stay valid until they expire.
pub async fn logout(
    State(state): State<AppState>,
    query: Result<Query<Pairs>, QueryRejection>,
) -> GateResult<Response> {
    let query = Params::query(query);
    let cookie = build_clear_cookie(&state.cookie)?;
    found_with_cookie(redirect_target(&query), &cookie)
}
