//! Datenbankmodelle fuer Pforte
//!
//! `User` ist der vollstaendige Datensatz inklusive Passwort-Hash und
//! verlaesst den Auth-Service nie. Nach aussen geht nur `UserProfile`.

use chrono::{DateTime, Utc};
use pforte_core::UserId;
use serde::{Deserialize, Serialize};

/// Benutzer-Datensatz aus der Datenbank
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Hash bleibt aus Logs heraus
impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password_hash", &"<verborgen>")
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// Daten zum Erstellen eines neuen Benutzers
///
/// ID und Zeitstempel vergibt der Store selbst.
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

/// Oeffentliche Sicht auf einen Benutzer (ohne Passwort-Hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Normalisiert eine E-Mail-Adresse fuer Eindeutigkeit und Suche
///
/// Leerraum am Rand wird entfernt, der Rest klein geschrieben. Alle Backends
/// wenden das beim Schreiben und beim Suchen an.
pub fn email_normalisieren(email: &str) -> String {
    email.trim().to_lowercase()
}
