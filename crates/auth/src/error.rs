//! Fehlertypen fuer den Auth-Service

use pforte_cache::CacheError;
use pforte_core::{KontextFehler, UngueltigeUserId};
use pforte_db::DbError;
use thiserror::Error;

/// Alle moeglichen Fehler im Auth-Service
#[derive(Debug, Error)]
pub enum AuthError {
    // --- Eingabe ---
    #[error("Ungueltige Eingabe: {0}")]
    Validierung(String),

    // --- Registrierung ---
    #[error("E-Mail bereits vergeben")]
    EmailVergeben,

    // --- Authentifizierung ---
    #[error("E-Mail oder Passwort falsch")]
    UngueltigeAnmeldedaten,

    #[error("Token ungueltig oder abgelaufen")]
    TokenUngueltig,

    // --- Benutzer ---
    #[error("Benutzer nicht gefunden: {0}")]
    BenutzerNichtGefunden(String),

    // --- Infrastruktur ---
    #[error("Datenbankfehler: {0}")]
    Datenbank(#[source] DbError),

    #[error("Cachefehler: {0}")]
    Cache(#[from] CacheError),

    #[error("Anfrage beendet: {0}")]
    Kontext(#[from] KontextFehler),

    #[error("Passwort-Hashing fehlgeschlagen: {0}")]
    PasswortHashing(String),

    #[error("Interner Fehler: {0}")]
    Intern(String),
}

/// Grobe Fehlerklasse, nach der der Transport seine Antwort waehlt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FehlerArt {
    Validierung,
    EmailVergeben,
    /// Falsche Anmeldedaten und ungueltige Tokens sind bewusst dieselbe Art
    Authentifizierung,
    NichtGefunden,
    Infrastruktur,
}

impl AuthError {
    pub fn intern(msg: impl Into<String>) -> Self {
        Self::Intern(msg.into())
    }

    pub fn validierung(msg: impl Into<String>) -> Self {
        Self::Validierung(msg.into())
    }

    pub fn art(&self) -> FehlerArt {
        match self {
            Self::Validierung(_) => FehlerArt::Validierung,
            Self::EmailVergeben => FehlerArt::EmailVergeben,
            Self::UngueltigeAnmeldedaten | Self::TokenUngueltig => FehlerArt::Authentifizierung,
            Self::BenutzerNichtGefunden(_) => FehlerArt::NichtGefunden,
            Self::Datenbank(_)
            | Self::Cache(_)
            | Self::Kontext(_)
            | Self::PasswortHashing(_)
            | Self::Intern(_) => FehlerArt::Infrastruktur,
        }
    }
}

// Nicht per #[from]: "nicht gefunden" und "Duplikat" sind fachliche Fehler
// und duerfen nicht als Datenbankausfall durchrutschen.
impl From<DbError> for AuthError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::EmailVergeben(_) => Self::EmailVergeben,
            DbError::NichtGefunden(msg) => Self::BenutzerNichtGefunden(msg),
            andere => Self::Datenbank(andere),
        }
    }
}

impl From<UngueltigeUserId> for AuthError {
    fn from(e: UngueltigeUserId) -> Self {
        Self::Validierung(e.to_string())
    }
}

/// Result-Alias fuer den Auth-Service
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_fehler_werden_fachlich_abgebildet() {
        let e: AuthError = DbError::EmailVergeben("a@x.com".into()).into();
        assert_eq!(e.art(), FehlerArt::EmailVergeben);

        let e: AuthError = DbError::nicht_gefunden("User 1").into();
        assert_eq!(e.art(), FehlerArt::NichtGefunden);

        let e: AuthError = DbError::intern("Platte voll").into();
        assert_eq!(e.art(), FehlerArt::Infrastruktur);
    }

    #[test]
    fn anmeldefehler_sind_ununterscheidbar() {
        assert_eq!(AuthError::UngueltigeAnmeldedaten.art(), AuthError::TokenUngueltig.art());
    }

    #[test]
    fn kontext_und_cache_sind_infrastruktur() {
        assert_eq!(AuthError::from(KontextFehler::Zeitlimit).art(), FehlerArt::Infrastruktur);
        assert_eq!(
            AuthError::from(CacheError::NichtErreichbar("weg".into())).art(),
            FehlerArt::Infrastruktur
        );
    }

    #[test]
    fn ungueltige_id_ist_validierung() {
        let e: AuthError = "xyz".parse::<pforte_core::UserId>().unwrap_err().into();
        assert_eq!(e.art(), FehlerArt::Validierung);
    }
}
