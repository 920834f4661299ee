//! Token-Store fuer Session-Tokens
//!
//! Ein Token ist ein zufaelliger, undurchsichtiger String (32 Byte aus dem
//! OS-Zufallsgenerator, URL-sicheres Base64). Die Metadaten liegen als ein
//! JSON-Wert unter `token:<token>` im Cache, mit derselben TTL wie das Token.
//! Den Ablauf erledigt der Cache; hier wird nichts aufgeraeumt.

use std::sync::Arc;
use std::time::Duration;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use pforte_cache::KvCache;
use pforte_core::UserId;
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, AuthResult};

const TOKEN_PRAEFIX: &str = "token:";

/// Entropie eines Tokens in Bytes
const TOKEN_BYTES: usize = 32;

/// Metadaten eines ausgestellten Tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub user_id: UserId,
    pub issued_at: DateTime<Utc>,
    pub expired_at: DateTime<Utc>,
}

/// Stellt Tokens aus, loest sie auf und widerruft sie
#[derive(Clone)]
pub struct TokenStore {
    cache: Arc<dyn KvCache>,
}

impl TokenStore {
    pub fn neu(cache: Arc<dyn KvCache>) -> Self {
        Self { cache }
    }

    /// Stellt ein neues Token fuer `user_id` aus, gueltig fuer `ttl`
    pub async fn issue(&self, user_id: UserId, ttl: Duration) -> AuthResult<String> {
        if ttl.is_zero() {
            return Err(AuthError::validierung("Token-TTL muss groesser als 0 sein"));
        }
        let jetzt = Utc::now();
        let expired_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|gueltigkeit| jetzt.checked_add_signed(gueltigkeit))
            .ok_or_else(|| AuthError::validierung(format!("Token-TTL {ttl:?} ist zu gross")))?;

        let token = token_generieren();
        let eintrag = Token {
            user_id,
            issued_at: jetzt,
            expired_at,
        };

        let wert = serde_json::to_string(&eintrag)
            .map_err(|e| AuthError::intern(format!("Token nicht serialisierbar: {e}")))?;
        self.cache.set_mit_ttl(&schluessel(&token), wert, ttl).await?;

        tracing::debug!(user_id = %user_id, laeuft_ab_am = %eintrag.expired_at, "Token ausgestellt");
        Ok(token)
    }

    /// Liefert die Metadaten eines lebenden Tokens
    ///
    /// Nie ausgestellt, abgelaufen und widerrufen sind nicht unterscheidbar:
    /// alles ergibt `AuthError::TokenUngueltig`.
    pub async fn resolve(&self, token: &str) -> AuthResult<Token> {
        if token.is_empty() {
            return Err(AuthError::TokenUngueltig);
        }

        let wert = self
            .cache
            .get(&schluessel(token))
            .await?
            .ok_or(AuthError::TokenUngueltig)?;

        serde_json::from_str(&wert)
            .map_err(|e| AuthError::intern(format!("Token-Eintrag nicht lesbar: {e}")))
    }

    /// Widerruft ein Token. Unbekannte Tokens sind kein Fehler.
    pub async fn revoke(&self, token: &str) -> AuthResult<()> {
        if token.is_empty() {
            return Ok(());
        }
        let entfernt = self.cache.delete(&schluessel(token)).await?;
        tracing::debug!(entfernt, "Token widerrufen");
        Ok(())
    }
}

fn schluessel(token: &str) -> String {
    format!("{TOKEN_PRAEFIX}{token}")
}

/// Generiert einen kryptografisch sicheren Token (URL-sicheres Base64)
fn token_generieren() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
