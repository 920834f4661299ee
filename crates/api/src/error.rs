//! Abbildung von Fehlern auf HTTP-Antworten
//!
//! Nach aussen gehen nur Statuscode, ein fester Code und eine feste Meldung
//! je Fehlerart. Der eigentliche Fehlertext wird nur serverseitig geloggt.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use pforte_auth::{AuthError, FehlerArt};
use serde_json::json;

/// Fehler eines Handlers
#[derive(Debug)]
pub enum ApiFehler {
    /// Fehler aus dem Session-Manager
    Auth(AuthError),
    /// Body war kein gueltiges JSON fuer den Endpunkt
    UngueltigerBody(JsonRejection),
}

impl From<AuthError> for ApiFehler {
    fn from(e: AuthError) -> Self {
        Self::Auth(e)
    }
}

impl From<JsonRejection> for ApiFehler {
    fn from(e: JsonRejection) -> Self {
        Self::UngueltigerBody(e)
    }
}

impl ApiFehler {
    pub fn art(&self) -> FehlerArt {
        match self {
            Self::Auth(e) => e.art(),
            Self::UngueltigerBody(_) => FehlerArt::Validierung,
        }
    }

    pub fn http_status(&self) -> StatusCode {
        match self.art() {
            FehlerArt::Validierung => StatusCode::BAD_REQUEST,
            FehlerArt::EmailVergeben => StatusCode::CONFLICT,
            FehlerArt::Authentifizierung => StatusCode::UNAUTHORIZED,
            FehlerArt::NichtGefunden => StatusCode::NOT_FOUND,
            FehlerArt::Infrastruktur => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Maschinenlesbarer Fehler-Code
    pub fn fehler_code(&self) -> &'static str {
        match self.art() {
            FehlerArt::Validierung => "validation_error",
            FehlerArt::EmailVergeben => "duplicate_email",
            FehlerArt::Authentifizierung => "authentication_failed",
            FehlerArt::NichtGefunden => "not_found",
            FehlerArt::Infrastruktur => "service_unavailable",
        }
    }

    /// Feste Meldung, unabhaengig vom internen Fehlertext
    pub fn meldung(&self) -> &'static str {
        match self.art() {
            FehlerArt::Validierung => "Ungueltige Eingabe",
            FehlerArt::EmailVergeben => "E-Mail-Adresse bereits vergeben",
            FehlerArt::Authentifizierung => "Authentifizierung fehlgeschlagen",
            FehlerArt::NichtGefunden => "Benutzer nicht gefunden",
            FehlerArt::Infrastruktur => "Dienst voruebergehend nicht verfuegbar",
        }
    }
}

impl std::fmt::Display for ApiFehler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auth(e) => write!(f, "{e}"),
            Self::UngueltigerBody(e) => write!(f, "Ungueltiger Body: {e}"),
        }
    }
}

impl IntoResponse for ApiFehler {
    fn into_response(self) -> Response {
        let status = self.http_status();

        if self.art() == FehlerArt::Infrastruktur {
            tracing::error!(fehler = %self, "Anfrage wegen Infrastrukturfehler abgebrochen");
        } else {
            tracing::debug!(fehler = %self, status = status.as_u16(), "Anfrage abgelehnt");
        }

        let body = json!({
            "error": {
                "code": self.fehler_code(),
                "message": self.meldung(),
            }
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pforte_core::KontextFehler;

    #[test]
    fn statuscodes_je_art() {
        let faelle = [
            (AuthError::validierung("x"), StatusCode::BAD_REQUEST),
            (AuthError::EmailVergeben, StatusCode::CONFLICT),
            (AuthError::UngueltigeAnmeldedaten, StatusCode::UNAUTHORIZED),
            (AuthError::TokenUngueltig, StatusCode::UNAUTHORIZED),
            (AuthError::BenutzerNichtGefunden("x".into()), StatusCode::NOT_FOUND),
            (AuthError::Kontext(KontextFehler::Zeitlimit), StatusCode::SERVICE_UNAVAILABLE),
            (AuthError::intern("x"), StatusCode::SERVICE_UNAVAILABLE),
        ];
        for (fehler, erwartet) in faelle {
            assert_eq!(ApiFehler::from(fehler).http_status(), erwartet);
        }
    }

    #[tokio::test]
    async fn interner_text_bleibt_intern() {
        let antwort = ApiFehler::from(AuthError::intern("sqlite: disk I/O error at /var/lib"))
            .into_response();
        assert_eq!(antwort.status(), StatusCode::SERVICE_UNAVAILABLE);

        let bytes = axum::body::to_bytes(antwort.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(!text.contains("sqlite"));
        assert!(text.contains("service_unavailable"));
    }
}
