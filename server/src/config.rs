//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! sinnvolle Standardwerte, sodass der Server ohne Konfigurationsdatei
//! lauffaehig ist.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use pforte_auth::{Argon2Parameter, SessionConfig};
use pforte_db::DatabaseConfig;
use serde::{Deserialize, Serialize};

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Netzwerk-Einstellungen der REST-API
    pub netzwerk: NetzwerkEinstellungen,
    /// Datenbank-Einstellungen
    pub datenbank: DatenbankEinstellungen,
    /// Lebensdauer und Aufraeumen der Session-Tokens
    pub token: TokenEinstellungen,
    /// Argon2-Parameter fuer neue Passwort-Hashes
    pub hashing: HashingEinstellungen,
    /// Zeitlimit pro Anfrage
    pub anfrage: AnfrageEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
}

/// Netzwerk-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetzwerkEinstellungen {
    pub bind_adresse: String,
    /// Port fuer die REST-API
    pub port: u16,
    /// CORS-Origins fuer REST (leer = alle erlaubt)
    pub cors_origins: Vec<String>,
}

impl Default for NetzwerkEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "0.0.0.0".into(),
            port: 8080,
            cors_origins: vec![],
        }
    }
}

/// Datenbank-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatenbankEinstellungen {
    /// Verbindungs-URL
    pub url: String,
    /// Maximale Verbindungspool-Groesse
    pub max_verbindungen: u32,
    /// WAL-Modus fuer SQLite
    pub wal: bool,
    /// Wartezeit auf eine freie Verbindung in Sekunden
    pub acquire_timeout_sek: u64,
}

impl Default for DatenbankEinstellungen {
    fn default() -> Self {
        Self {
            url: "sqlite://pforte.db".into(),
            max_verbindungen: 5,
            wal: true,
            acquire_timeout_sek: 5,
        }
    }
}

/// Token-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenEinstellungen {
    /// Lebensdauer eines Tokens in Minuten (Standard: 24 Stunden)
    pub ttl_minuten: u64,
    /// Intervall, in dem der Cache abgelaufene Tokens entfernt
    pub bereinigung_sekunden: u64,
}

impl Default for TokenEinstellungen {
    fn default() -> Self {
        Self {
            ttl_minuten: 1440,
            bereinigung_sekunden: 60,
        }
    }
}

/// Argon2-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HashingEinstellungen {
    pub speicher_kib: u32,
    pub iterationen: u32,
    pub parallelitaet: u32,
}

impl Default for HashingEinstellungen {
    fn default() -> Self {
        let p = Argon2Parameter::default();
        Self {
            speicher_kib: p.speicher_kib,
            iterationen: p.iterationen,
            parallelitaet: p.parallelitaet,
        }
    }
}

/// Anfrage-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnfrageEinstellungen {
    /// Zeitlimit pro Anfrage in Millisekunden
    pub timeout_ms: u64,
}

impl Default for AnfrageEinstellungen {
    fn default() -> Self {
        Self { timeout_ms: 5000 }
    }
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    pub fn laden(pfad: &str) -> anyhow::Result<Self> {
        match std::fs::read_to_string(pfad) {
            Ok(inhalt) => {
                let config: Self = toml::from_str(&inhalt)
                    .map_err(|e| anyhow::anyhow!("Konfigurationsfehler in '{pfad}': {e}"))?;
                config.pruefen()?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    pfad = pfad,
                    "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
                );
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!(
                "Konfigurationsdatei '{pfad}' nicht lesbar: {e}"
            )),
        }
    }

    /// Lehnt Werte ab, mit denen der Server nicht sinnvoll laufen kann
    pub fn pruefen(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.token.ttl_minuten > 0, "[token] ttl_minuten muss groesser 0 sein");
        self.session_config()?;
        anyhow::ensure!(self.anfrage.timeout_ms > 0, "[anfrage] timeout_ms muss groesser 0 sein");
        anyhow::ensure!(
            self.datenbank.max_verbindungen > 0,
            "[datenbank] max_verbindungen muss groesser 0 sein"
        );
        Ok(())
    }

    /// Bind-Adresse fuer den REST-Server
    pub fn rest_bind_adresse(&self) -> anyhow::Result<SocketAddr> {
        let adresse = format!("{}:{}", self.netzwerk.bind_adresse, self.netzwerk.port);
        adresse
            .parse()
            .with_context(|| format!("Ungueltige Bind-Adresse '{adresse}'"))
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.datenbank.url.clone(),
            max_verbindungen: self.datenbank.max_verbindungen,
            sqlite_wal: self.datenbank.wal,
            acquire_timeout: Duration::from_secs(self.datenbank.acquire_timeout_sek),
        }
    }

    pub fn session_config(&self) -> anyhow::Result<SessionConfig> {
        let sekunden = self
            .token
            .ttl_minuten
            .checked_mul(60)
            .context("[token] ttl_minuten ist zu gross")?;
        let config = SessionConfig {
            token_ttl: Duration::from_secs(sekunden),
        };
        config
            .pruefen()
            .map_err(|e| anyhow::anyhow!("[token] ttl_minuten unbrauchbar: {e}"))?;
        Ok(config)
    }

    pub fn argon2_parameter(&self) -> Argon2Parameter {
        Argon2Parameter {
            speicher_kib: self.hashing.speicher_kib,
            iterationen: self.hashing.iterationen,
            parallelitaet: self.hashing.parallelitaet,
        }
    }

    pub fn anfrage_timeout(&self) -> Duration {
        Duration::from_millis(self.anfrage.timeout_ms)
    }

    pub fn bereinigung_intervall(&self) -> Duration {
        Duration::from_secs(self.token.bereinigung_sekunden.max(1))
    }
}
