//! OAuth2-shaped client-credentials grant.

use axum::Json;
use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Form, Query, State};

use dale_auth::{AGENT_IDENTITY, ClientCredentialsGrant, TokenResponse, evaluate_grant};

use super::{Pairs, Params};
use crate::error::GateResult;
use crate::state::AppState;

/// POST /oauth2/token
///
/// Fields come from the body, then the query string. Every machine client
/// shares the `agent` identity.
pub async fn token(
    State(state): State<AppState>,
    query: Result<Query<Pairs>, QueryRejection>,
    form: Result<Form<Pairs>, FormRejection>,
) -> GateResult<Json<TokenResponse>> {
    let fields = Params::form(form, &Params::query(query));
    let grant = ClientCredentialsGrant {
        client_id: fields.get("client_id").to_string(),
        client_secret: fields.get("client_secret").to_string(),
        grant_type: fields.get("grant_type").to_string(),
    };

    if let Err(err) = evaluate_grant(&grant, &state.credentials) {
        tracing::warn!(client_id = %grant.client_id, error = %err, "token grant refused");
        return Err(err.into());
    }

    let access_token = state.signer.sign(AGENT_IDENTITY)?;
    tracing::info!(client_id = %grant.client_id, "issued agent token");
    Ok(Json(TokenResponse::bearer(
        access_token,
        state.signer.expires_in(),
    )))
}
