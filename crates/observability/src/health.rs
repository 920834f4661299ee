//! Health-Check-Endpunkt fuer Pforte
//!
//! Endpoint: `GET /health`
//! Response: JSON mit Status, Version, Uptime und Erreichbarkeit des
//! Benutzer-Stores

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

/// Status des Health-Checks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Antwort des Health-Check-Endpunkts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub db_connected: bool,
}

/// Pruefung, ob eine Abhaengigkeit (z.B. die Datenbank) erreichbar ist
#[async_trait]
pub trait Bereitschaft: Send + Sync {
    async fn bereit(&self) -> bool;
}

/// Geteilter Zustand fuer den Health-Check-Handler
#[derive(Clone)]
pub struct HealthState {
    start_time: Instant,
    datenbank: Option<Arc<dyn Bereitschaft>>,
}

impl HealthState {
    /// Health-State ohne Datenbank-Pruefung
    pub fn neu() -> Self {
        Self {
            start_time: Instant::now(),
            datenbank: None,
        }
    }

    pub fn mit_datenbank(mut self, pruefung: Arc<dyn Bereitschaft>) -> Self {
        self.datenbank = Some(pruefung);
        self
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    async fn db_verbunden(&self) -> bool {
        match &self.datenbank {
            Some(pruefung) => pruefung.bereit().await,
            None => true,
        }
    }
}

impl Default for HealthState {
    fn default() -> Self {
        Self::neu()
    }
}

/// Axum-Router fuer den `/health`-Endpunkt
pub fn health_router(state: HealthState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

/// `GET /health` – gibt den Serverstatus zurueck
async fn health_handler(State(state): State<HealthState>) -> impl IntoResponse {
    let db_connected = state.db_verbunden().await;
    let (status, http_status) = if db_connected {
        (HealthStatus::Healthy, StatusCode::OK)
    } else {
        tracing::warn!("Health-Check: Datenbank nicht erreichbar");
        (HealthStatus::Unhealthy, StatusCode::SERVICE_UNAVAILABLE)
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        db_connected,
    };

    (http_status, Json(response))
}
