//! pforte-server – Bibliotheks-Root
//!
//! Kompositionswurzel: baut die Bausteine von unten nach oben (Datenbank,
//! Cache, Hasher, Session-Manager) und reicht genau einen `SessionManager`
//! an die REST-API weiter.

pub mod config;

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use config::ServerConfig;
use pforte_api::{router, AppState, RestServer, RestServerKonfig};
use pforte_auth::{Argon2Hasher, SessionManager};
use pforte_cache::SpeicherCache;
use pforte_db::SqliteDb;
use pforte_observability::{Bereitschaft, HealthState};

/// Health-Pruefung gegen den SQLite-Pool
struct DbBereitschaft(SqliteDb);

#[async_trait]
impl Bereitschaft for DbBereitschaft {
    async fn bereit(&self) -> bool {
        self.0.erreichbar().await
    }
}

/// Fertig verdrahtete Bausteine eines Servers
pub struct Komponenten {
    pub db: SqliteDb,
    pub sessions: Arc<SessionManager>,
    pub health: HealthState,
}

/// Haelt den laufenden Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Baut alle Bausteine, Blaetter zuerst
    pub async fn komponenten_bauen(&self) -> Result<Komponenten> {
        let db_config = self.config.database_config();
        tracing::info!(url = %db_config.url, "Datenbankverbindung wird hergestellt");
        let db = SqliteDb::oeffnen(&db_config)
            .await
            .context("Datenbank konnte nicht geoeffnet werden")?;

        let cache = SpeicherCache::mit_bereinigung(
            SpeicherCache::neu(),
            self.config.bereinigung_intervall(),
        );

        let hasher = Argon2Hasher::neu(self.config.argon2_parameter())
            .context("Ungueltige Argon2-Parameter")?;

        let session_config = self.config.session_config()?;
        let sessions = SessionManager::neu(Arc::new(db.clone()), cache, Arc::new(hasher), session_config)
            .context("Session-Manager konnte nicht gebaut werden")?;
        let sessions = Arc::new(sessions);

        let health = HealthState::neu().mit_datenbank(Arc::new(DbBereitschaft(db.clone())));

        Ok(Komponenten {
            db,
            sessions,
            health,
        })
    }

    /// Startet den Server und laeuft bis Ctrl-C / SIGTERM
    pub async fn starten(self) -> Result<()> {
        self.starten_bis(shutdown_signal()).await
    }

    /// Startet den Server und laeuft, bis `shutdown` fertig ist
    pub async fn starten_bis<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.rest_bind_adresse()?;
        tracing::info!(
            addr = %bind_addr,
            token_ttl_minuten = self.config.token.ttl_minuten,
            "Server startet"
        );

        let komponenten = self.komponenten_bauen().await?;
        let state = AppState::neu(komponenten.sessions, self.config.anfrage_timeout());
        let app = router(state, komponenten.health);

        let rest = RestServer::neu(RestServerKonfig {
            bind_addr,
            cors_origins: self.config.netzwerk.cors_origins.clone(),
        });
        rest.starten(app, shutdown).await?;

        komponenten.db.schliessen().await;
        tracing::info!("Server beendet");
        Ok(())
    }
}

/// Wartet auf Ctrl-C oder (unter Unix) SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(fehler = %e, "Ctrl-C-Handler konnte nicht installiert werden");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(fehler = %e, "SIGTERM-Handler konnte nicht installiert werden");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown-Signal empfangen, Server wird beendet");
}
