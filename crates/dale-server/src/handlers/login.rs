//! Interactive login: form credentials in, session cookie out.

use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Form, Query, State};
use axum::response::{Html, IntoResponse, Response};

use dale_auth::build_set_cookie;

use super::{Pairs, Params, found_with_cookie, redirect_target};
use crate::error::GateResult;
use crate::page::{LOGIN_ERROR, render_login};
use crate::state::AppState;

/// GET /auth/login
pub async fn login_page() -> Html<String> {
    Html(render_login(None))
}

/// POST /auth/login
///
/// On success sets the `session` cookie and redirects to `?redirect=` (or `/`).
/// On failure re-renders the form with a message that does not say which
/// field was wrong.
pub async fn login(
    State(state): State<AppState>,
    query: Result<Query<Pairs>, QueryRejection>,
    form: Result<Form<Pairs>, FormRejection>,
) -> GateResult<Response> {
    let query = Params::query(query);
    let fields = Params::form(form, &query);
    let username = fields.get("username");

    if !state.credentials.matches(username, fields.get("password")) {
        tracing::warn!(username, "login failed");
        return Ok(Html(render_login(Some(LOGIN_ERROR))).into_response());
    }

    let token = state.signer.sign(username)?;
    let cookie = build_set_cookie(&token, &state.cookie)?;

    let target = redirect_target(&query);
    tracing::info!(username, redirect = target, "login succeeded");
    found_with_cookie(target, &cookie)
}
