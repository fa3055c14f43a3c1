//! HTTP handlers

mod check;
mod login;
mod logout;
mod misc;
mod token;

pub use check::check;
pub use login::{login, login_page};
pub use logout::logout;
pub use misc::{health, logo, method_not_allowed, root};
pub use token::token;

use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Form, Query};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::error::{GateError, GateResult};

/// Raw urlencoded fields as extracted by `Query` or `Form`.
pub type Pairs = Vec<(String, String)>;

/// Urlencoded request fields in lookup order. Repeated keys are kept and
/// lookups return the first value, so a duplicated key never fails the
/// whole request.
#[derive(Debug, Default)]
pub struct Params(Pairs);

impl Params {
    /// Query-string fields only. An unparseable query counts as empty.
    pub fn query(query: Result<Query<Pairs>, QueryRejection>) -> Self {
        Self(query.map(|Query(pairs)| pairs).unwrap_or_default())
    }

    /// Body fields, then query fields. A missing or non-urlencoded body
    /// counts as empty.
    pub fn form(form: Result<Form<Pairs>, FormRejection>, query: &Params) -> Self {
        let mut pairs = form.map(|Form(pairs)| pairs).unwrap_or_default();
        pairs.extend(query.0.iter().cloned());
        Self(pairs)
    }

    /// First value for `key`, empty when absent.
    pub fn get(&self, key: &str) -> &str {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map_or("", |(_, v)| v.as_str())
    }
}

/// `?redirect=` target, `/` when absent or empty.
fn redirect_target(query: &Params) -> &str {
    match query.get("redirect") {
        "" => "/",
        target => target,
    }
}

/// `302 Found` to `location`, setting `cookie`.
fn found_with_cookie(location: &str, cookie: &str) -> GateResult<Response> {
    let location = HeaderValue::from_str(location).map_err(|_| GateError::InvalidRedirect)?;
    let cookie = HeaderValue::from_str(cookie).map_err(|e| GateError::Internal(e.to_string()))?;
    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, location), (header::SET_COOKIE, cookie)],
    )
        .into_response())
}
