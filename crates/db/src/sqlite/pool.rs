//! Verbindungsaufbau zur SQLite-Datenbank
//!
//! Beim Oeffnen wird das Schema ueber die eingebetteten Migrationen auf den
//! aktuellen Stand gebracht. Ohne erfolgreiche Migration gibt es kein
//! `SqliteDb`.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::error::DbResult;
use crate::repository::DatabaseConfig;

/// Benutzer-Store auf SQLite
#[derive(Debug, Clone)]
pub struct SqliteDb {
    pub(crate) pool: SqlitePool,
}

fn journal_modus(wal: bool) -> SqliteJournalMode {
    if wal {
        SqliteJournalMode::Wal
    } else {
        SqliteJournalMode::Delete
    }
}

impl SqliteDb {
    /// Oeffnet (oder erzeugt) die Datenbank unter `config.url` und migriert sie
    pub async fn oeffnen(config: &DatabaseConfig) -> DbResult<Self> {
        let verbindung = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .journal_mode(journal_modus(config.sqlite_wal));

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_verbindungen)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(verbindung)
            .await?;

        tracing::info!(
            url = %config.url,
            wal = config.sqlite_wal,
            verbindungen = config.max_verbindungen,
            "Benutzerdatenbank verbunden"
        );
        Self::migriert(pool).await
    }

    /// Fluechtige Datenbank im Speicher, eine einzige Verbindung haelt sie am Leben
    pub async fn in_memory() -> DbResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?)
            .await?;
        Self::migriert(pool).await
    }

    async fn migriert(pool: SqlitePool) -> DbResult<Self> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::debug!("Schema der Benutzerdatenbank aktuell");
        Ok(Self { pool })
    }

    /// `true`, solange ein `SELECT 1` durchgeht
    pub async fn erreichbar(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// Schliesst alle Verbindungen. Danach schlaegt jeder Zugriff fehl.
    pub async fn schliessen(&self) {
        self.pool.close().await;
    }
}
