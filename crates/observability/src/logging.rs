//! Structured Logging Setup via tracing-subscriber
//!
//! Konfigurierbar per Umgebungsvariable, die Werte aus der Konfigurationsdatei
//! werden dabei ueberschrieben:
//! - `PFORTE_LOG_LEVEL`: Filter-Ausdruck (z.B. `info` oder `pforte_auth=debug`)
//! - `PFORTE_LOG_FORMAT`: Format (text/json)

use anyhow::{anyhow, Result};
use tracing_subscriber::{fmt, EnvFilter};

pub const ENV_LOG_LEVEL: &str = "PFORTE_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "PFORTE_LOG_FORMAT";

/// Ausgabeformat der Log-Zeilen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    /// Unbekannte Werte fallen auf `Text` zurueck
    pub fn aus_str(format: &str) -> Self {
        match format.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Initialisiert das Logging-System einmal pro Prozess.
///
/// `level` und `format` kommen aus der Konfiguration und werden von
/// `PFORTE_LOG_LEVEL` bzw. `PFORTE_LOG_FORMAT` ueberschrieben.
pub fn logging_initialisieren(level: &str, format: &str) -> Result<()> {
    let filter = EnvFilter::try_from_env(ENV_LOG_LEVEL)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let format = std::env::var(ENV_LOG_FORMAT).unwrap_or_else(|_| format.to_string());

    let ergebnis = match LogFormat::aus_str(&format) {
        LogFormat::Json => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_current_span(true)
            .try_init(),
        LogFormat::Text => fmt().with_env_filter(filter).with_target(true).try_init(),
    };

    ergebnis.map_err(|e| anyhow!("Logging bereits initialisiert: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_erkennung() {
        assert_eq!(LogFormat::aus_str("json"), LogFormat::Json);
        assert_eq!(LogFormat::aus_str(" JSON "), LogFormat::Json);
        assert_eq!(LogFormat::aus_str("text"), LogFormat::Text);
        assert_eq!(LogFormat::aus_str("xml"), LogFormat::Text);
        assert_eq!(LogFormat::aus_str(""), LogFormat::Text);
    }

    #[test]
    fn zweite_initialisierung_schlaegt_fehl() {
        // Andere Tests koennen bereits initialisiert haben, daher nur die zweite pruefen
        let _ = logging_initialisieren("info", "text");
        assert!(logging_initialisieren("info", "text").is_err());
    }
}
