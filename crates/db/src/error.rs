//! Fehlertypen fuer das Datenbank-Crate

use thiserror::Error;

/// Datenbank-Fehlertypen
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Datensatz nicht gefunden: {0}")]
    NichtGefunden(String),

    #[error("E-Mail bereits vergeben: {0}")]
    EmailVergeben(String),

    #[error("SQLx-Fehler: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration-Fehler: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Interner DB-Fehler: {0}")]
    Intern(String),
}

/// Result-Alias fuer das Datenbank-Crate
pub type DbResult<T> = Result<T, DbError>;

impl DbError {
    pub fn nicht_gefunden(msg: impl Into<String>) -> Self {
        Self::NichtGefunden(msg.into())
    }

    pub fn intern(msg: impl Into<String>) -> Self {
        Self::Intern(msg.into())
    }

    /// `true` wenn der Store selbst versagt hat (nicht erreichbar, Timeout,
    /// kaputter Datensatz) und nicht bloss nichts gefunden oder ein Duplikat
    /// erkannt hat
    pub fn ist_infrastruktur(&self) -> bool {
        matches!(self, Self::Sqlx(_) | Self::Migration(_) | Self::Intern(_))
    }
}

/// Prueft ob ein SQLx-Fehler eine verletzte UNIQUE-Constraint meldet
pub(crate) fn ist_eindeutigkeitsverletzung(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}
