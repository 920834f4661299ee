//! HTTP-Schnittstelle fuer Pforte
//!
//! Duenne Schicht ueber dem `SessionManager`: JSON rein, JSON raus. Jede
//! Anfrage bekommt einen eigenen `RequestContext` mit dem konfigurierten
//! Zeitlimit. Fehler werden nach ihrer Art auf Statuscode und feste
//! Meldung abgebildet (siehe [`error::ApiFehler`]).

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

use std::sync::Arc;
use std::time::Duration;

use pforte_auth::SessionManager;
use pforte_core::RequestContext;

/// Axum-State fuer die Pforte-API
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
    pub anfrage_timeout: Duration,
}

impl AppState {
    pub fn neu(sessions: Arc<SessionManager>, anfrage_timeout: Duration) -> Self {
        Self {
            sessions,
            anfrage_timeout,
        }
    }

    /// Frischer Kontext fuer eine einzelne Anfrage
    pub fn kontext(&self) -> RequestContext {
        RequestContext::mit_zeitlimit(self.anfrage_timeout)
    }
}

pub use error::ApiFehler;
pub use routes::router;
pub use server::{RestServer, RestServerKonfig};
