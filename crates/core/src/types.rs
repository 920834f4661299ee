//! Identifikationstypen fuer Pforte
//!
//! Benutzer-IDs verwenden das Newtype-Pattern, damit eine beliebige UUID
//! nicht versehentlich als Benutzer-ID durchgereicht wird.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Eindeutige Benutzer-ID (UUID v4, immer serverseitig erzeugt)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Erstellt eine neue zufaellige UserId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Eingabe liess sich nicht als Benutzer-ID lesen
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Ungueltige Benutzer-ID: '{0}'")]
pub struct UngueltigeUserId(pub String);

impl FromStr for UserId {
    type Err = UngueltigeUserId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| UngueltigeUserId(s.to_string()))
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}
