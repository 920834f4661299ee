//! Session-Manager fuer Pforte
//!
//! Zentraler Einstiegspunkt fuer Registrierung, Login, Token-Pruefung und
//! Profilabfrage. Kennt Benutzer-Store, Cache und Hasher nur ueber ihre
//! Traits; zusammengesteckt wird im Server.
//!
//! Jeder Store-Aufruf laeuft ueber den `RequestContext` der Anfrage und
//! endet damit an dessen Deadline oder beim Abbruch.

use std::sync::Arc;
use std::time::Duration;

use pforte_cache::KvCache;
use pforte_core::{RequestContext, UserId};
use pforte_db::{email_normalisieren, DbError, UserDraft, UserProfile, UserStore};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AuthError, AuthResult},
    password::CredentialHasher,
    token::TokenStore,
};

/// Obergrenze fuer Passwoerter, damit Hashing nicht beliebig teuer wird
const MAX_PASSWORT_BYTES: usize = 1024;

const PLATZHALTER_PASSWORT: &str = "pforte-platzhalter-passwort";

/// Einstellungen des Session-Managers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Lebensdauer neu ausgestellter Tokens
    pub token_ttl: Duration,
}

impl SessionConfig {
    /// Lehnt Lebensdauern ab, mit denen kein Token ausgestellt werden kann
    pub fn pruefen(&self) -> AuthResult<()> {
        if self.token_ttl.is_zero() {
            return Err(AuthError::intern("Token-TTL muss groesser als 0 sein"));
        }
        let ablauf = chrono::Duration::from_std(self.token_ttl)
            .ok()
            .and_then(|ttl| chrono::Utc::now().checked_add_signed(ttl));
        if ablauf.is_none() {
            return Err(AuthError::intern(format!(
                "Token-TTL {:?} ist zu gross",
                self.token_ttl
            )));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_ttl: Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// Eingabe fuer die Registrierung
#[derive(Clone, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Eingabe fuer den Login
#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Ergebnis von Registrierung und Login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionGrant {
    pub user: UserProfile,
    pub token: String,
}

/// Session-Manager – orchestriert Benutzer-Store, Token-Store und Hasher
pub struct SessionManager {
    users: Arc<dyn UserStore>,
    tokens: TokenStore,
    hasher: Arc<dyn CredentialHasher>,
    config: SessionConfig,
    /// Hash eines festen Passworts; unbekannte E-Mails werden dagegen
    /// verifiziert, damit der Login gleich lange dauert
    platzhalter_hash: String,
}

impl SessionManager {
    /// Erstellt einen neuen SessionManager aus bereits gebauten Bausteinen
    ///
    /// Schlaegt fehl, wenn die Token-Lebensdauer unbrauchbar ist oder der
    /// Hasher keinen Platzhalter-Hash erzeugen kann.
    pub fn neu(
        users: Arc<dyn UserStore>,
        cache: Arc<dyn KvCache>,
        hasher: Arc<dyn CredentialHasher>,
        config: SessionConfig,
    ) -> AuthResult<Self> {
        config.pruefen()?;
        let platzhalter_hash = hasher.hash(PLATZHALTER_PASSWORT)?;

        Ok(Self {
            users,
            tokens: TokenStore::neu(cache),
            hasher,
            config,
            platzhalter_hash,
        })
    }

    /// Registriert einen neuen Benutzer und stellt direkt ein Token aus
    pub async fn register(
        &self,
        ctx: &RequestContext,
        anfrage: RegisterRequest,
    ) -> AuthResult<SessionGrant> {
        let first_name = pflichtfeld("first_name", &anfrage.first_name)?;
        let last_name = pflichtfeld("last_name", &anfrage.last_name)?;
        let email = email_pruefen(&anfrage.email)?;
        passwort_pruefen(&anfrage.password)?;

        // Vorab-Pruefung; das eigentliche Rennen entscheidet create()
        match ctx.ausfuehren(self.users.find_by_email(&email)).await? {
            Ok(_) => return Err(AuthError::EmailVergeben),
            Err(DbError::NichtGefunden(_)) => {}
            Err(e) => return Err(e.into()),
        }

        let password_hash = self.hashen(ctx, anfrage.password).await?;

        let user = ctx
            .ausfuehren(self.users.create(UserDraft {
                first_name,
                last_name,
                email,
                password_hash,
            }))
            .await??;

        let token = match self.token_ausstellen(ctx, user.id).await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(
                    user_id = %user.id,
                    fehler = %e,
                    "Benutzer angelegt, aber Token konnte nicht ausgestellt werden"
                );
                return Err(e);
            }
        };

        tracing::info!(user_id = %user.id, "Neuer Benutzer registriert");

        Ok(SessionGrant {
            user: user.into(),
            token,
        })
    }

    /// Meldet einen Benutzer an und stellt ein neues Token aus
    ///
    /// Unbekannte E-Mail und falsches Passwort ergeben denselben Fehler.
    pub async fn login(
        &self,
        ctx: &RequestContext,
        anfrage: LoginRequest,
    ) -> AuthResult<SessionGrant> {
        let email = email_normalisieren(&anfrage.email);
        if email.is_empty() || anfrage.password.is_empty() {
            return Err(AuthError::validierung("E-Mail und Passwort sind Pflicht"));
        }

        let user = match ctx.ausfuehren(self.users.find_by_email(&email)).await? {
            Ok(user) => user,
            Err(DbError::NichtGefunden(_)) => {
                // Gleicher Aufwand wie bei falschem Passwort
                let _ = self
                    .pruefen(ctx, self.platzhalter_hash.clone(), anfrage.password)
                    .await?;
                tracing::warn!("Fehlgeschlagener Login-Versuch");
                return Err(AuthError::UngueltigeAnmeldedaten);
            }
            Err(e) => return Err(e.into()),
        };

        let korrekt = self
            .pruefen(ctx, user.password_hash.clone(), anfrage.password)
            .await?;
        if !korrekt {
            tracing::warn!(user_id = %user.id, "Fehlgeschlagener Login-Versuch");
            return Err(AuthError::UngueltigeAnmeldedaten);
        }

        let token = self.token_ausstellen(ctx, user.id).await?;

        tracing::info!(user_id = %user.id, "Benutzer angemeldet");

        Ok(SessionGrant {
            user: user.into(),
            token,
        })
    }

    /// Prueft ein Token und liefert die gebundene Benutzer-ID
    pub async fn authenticate(&self, ctx: &RequestContext, token: &str) -> AuthResult<UserId> {
        if token.is_empty() {
            return Err(AuthError::TokenUngueltig);
        }
        let eintrag = ctx.ausfuehren(self.tokens.resolve(token)).await??;
        Ok(eintrag.user_id)
    }

    /// Laedt das Profil eines Benutzers anhand seiner ID
    pub async fn get_user(&self, ctx: &RequestContext, user_id: &str) -> AuthResult<UserProfile> {
        let id: UserId = user_id.parse()?;
        let user = ctx.ausfuehren(self.users.find_by_id(id)).await??;
        Ok(user.into())
    }

    /// Widerruft ein Token (Abmeldung). Unbekannte Tokens sind kein Fehler.
    pub async fn logout(&self, ctx: &RequestContext, token: &str) -> AuthResult<()> {
        ctx.ausfuehren(self.tokens.revoke(token)).await??;
        tracing::debug!("Session beendet (Abmeldung)");
        Ok(())
    }

    async fn token_ausstellen(&self, ctx: &RequestContext, user_id: UserId) -> AuthResult<String> {
        ctx.ausfuehren(self.tokens.issue(user_id, self.config.token_ttl))
            .await?
    }

    /// Hasht auf dem Blocking-Pool, Argon2 ist absichtlich teuer
    async fn hashen(&self, ctx: &RequestContext, passwort: String) -> AuthResult<String> {
        let hasher = Arc::clone(&self.hasher);
        ctx.ausfuehren(tokio::task::spawn_blocking(move || hasher.hash(&passwort)))
            .await?
            .map_err(|e| AuthError::intern(format!("Hashing-Task abgebrochen: {e}")))?
    }

    async fn pruefen(
        &self,
        ctx: &RequestContext,
        digest: String,
        passwort: String,
    ) -> AuthResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        ctx.ausfuehren(tokio::task::spawn_blocking(move || {
            hasher.verify(&digest, &passwort)
        }))
        .await?
        .map_err(|e| AuthError::intern(format!("Verifikations-Task abgebrochen: {e}")))
    }
}

fn pflichtfeld(name: &str, wert: &str) -> AuthResult<String> {
    let wert = wert.trim();
    if wert.is_empty() {
        return Err(AuthError::validierung(format!("{name} darf nicht leer sein")));
    }
    Ok(wert.to_string())
}

/// Normalisiert die E-Mail und prueft die grobe Form `lokal@domain`
fn email_pruefen(email: &str) -> AuthResult<String> {
    let email = email_normalisieren(email);
    match email.split_once('@') {
        Some((lokal, domain)) if !lokal.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(email)
        }
        _ => Err(AuthError::validierung("E-Mail-Adresse ist ungueltig")),
    }
}

fn passwort_pruefen(passwort: &str) -> AuthResult<()> {
    if passwort.is_empty() {
        return Err(AuthError::validierung("Passwort darf nicht leer sein"));
    }
    if passwort.len() > MAX_PASSWORT_BYTES {
        return Err(AuthError::validierung(format!(
            "Passwort darf hoechstens {MAX_PASSWORT_BYTES} Bytes lang sein"
        )));
    }
    Ok(())
}
