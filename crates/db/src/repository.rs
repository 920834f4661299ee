//! Repository-Trait und Verbindungskonfiguration
//!
//! Der Session-Manager kennt nur `UserStore`. Welches Backend dahinter
//! steckt, entscheidet die Komposition im Server.

use std::time::Duration;

use async_trait::async_trait;
use pforte_core::UserId;

use crate::error::DbResult;
use crate::models::{User, UserDraft};

/// Konfiguration fuer die Datenbankverbindung
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Verbindungs-URL (z.B. "sqlite://pforte.db")
    pub url: String,
    /// Maximale Anzahl gleichzeitiger Verbindungen im Pool
    pub max_verbindungen: u32,
    /// Ob WAL-Modus bei SQLite aktiviert werden soll
    pub sqlite_wal: bool,
    /// Wie lange auf eine freie Verbindung gewartet wird
    pub acquire_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://pforte.db".into(),
            max_verbindungen: 5,
            sqlite_wal: true,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// Dauerhafter Benutzer-Store
///
/// Fehlerkonvention: `DbError::NichtGefunden` fuer leere Treffer,
/// `DbError::EmailVergeben` fuer Duplikate, alles andere ist ein
/// Infrastrukturfehler.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Legt einen Benutzer an. ID und Zeitstempel vergibt der Store; die
    /// Eindeutigkeit der E-Mail wird atomar beim Einfuegen geprueft.
    async fn create(&self, entwurf: UserDraft) -> DbResult<User>;

    /// Laedt einen Benutzer anhand seiner ID
    async fn find_by_id(&self, id: UserId) -> DbResult<User>;

    /// Laedt einen Benutzer anhand der (normalisierten) E-Mail
    async fn find_by_email(&self, email: &str) -> DbResult<User>;
}
