//! REST-Handler fuer Registrierung, Login, Token-Pruefung und Abmeldung

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use pforte_auth::{LoginRequest, RegisterRequest};
use pforte_core::UserId;
use serde::{Deserialize, Serialize};

use crate::{error::ApiFehler, AppState};

#[derive(Debug, Deserialize)]
pub struct TokenBody {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthenticateAntwort {
    pub user_id: UserId,
}

/// POST /v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Response, ApiFehler> {
    let Json(anfrage) = body?;
    let grant = state.sessions.register(&state.kontext(), anfrage).await?;
    Ok((StatusCode::CREATED, Json(grant)).into_response())
}

/// POST /v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ApiFehler> {
    let Json(anfrage) = body?;
    let grant = state.sessions.login(&state.kontext(), anfrage).await?;
    Ok(Json(grant).into_response())
}

/// POST /v1/auth/authenticate
pub async fn authenticate(
    State(state): State<AppState>,
    body: Result<Json<TokenBody>, JsonRejection>,
) -> Result<Json<AuthenticateAntwort>, ApiFehler> {
    let Json(body) = body?;
    let user_id = state
        .sessions
        .authenticate(&state.kontext(), &body.token)
        .await?;
    Ok(Json(AuthenticateAntwort { user_id }))
}

/// POST /v1/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    body: Result<Json<TokenBody>, JsonRejection>,
) -> Result<StatusCode, ApiFehler> {
    let Json(body) = body?;
    state.sessions.logout(&state.kontext(), &body.token).await?;
    Ok(StatusCode::NO_CONTENT)
}
