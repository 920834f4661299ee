//! pforte-cache – Schluessel-Wert-Cache mit TTL
//!
//! `KvCache` beschreibt, was der Token-Store von einem Cache braucht:
//! Setzen mit Ablaufzeit, Lesen und Loeschen. Abgelaufene Eintraege sind fuer
//! Leser sofort unsichtbar, ohne dass die Anwendung etwas aufraeumen muss.

pub mod error;
pub mod speicher;

use std::time::Duration;

use async_trait::async_trait;

pub use error::{CacheError, CacheResult};
pub use speicher::SpeicherCache;

/// Schluessel-Wert-Cache mit nativer Ablaufzeit pro Eintrag
#[async_trait]
pub trait KvCache: Send + Sync {
    /// Setzt `key` auf `wert`; nach `ttl` ist der Eintrag verschwunden
    async fn set_mit_ttl(&self, key: &str, wert: String, ttl: Duration) -> CacheResult<()>;

    /// Liest `key`; `None` wenn nie gesetzt, geloescht oder abgelaufen
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Loescht `key`; `true` wenn ein lebender Eintrag entfernt wurde
    async fn delete(&self, key: &str) -> CacheResult<bool>;
}
