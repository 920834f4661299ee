//! REST-Handler fuer Benutzerprofile

use axum::{
    extract::{Path, State},
    response::Json,
};
use pforte_auth::UserProfile;
use serde::{Deserialize, Serialize};

use crate::{error::ApiFehler, AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct UserAntwort {
    pub user: UserProfile,
}

/// GET /v1/users/:id
///
/// Die ID wird als String angenommen, damit eine ungueltige UUID als
/// Validierungsfehler und nicht als Routing-Fehler endet.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserAntwort>, ApiFehler> {
    let user = state.sessions.get_user(&state.kontext(), &id).await?;
    Ok(Json(UserAntwort { user }))
}
