//! In-Process-Cache mit Ablaufzeit pro Eintrag
//!
//! Jeder Eintrag traegt seine Deadline (`tokio::time::Instant`). Ein Eintrag
//! ist sichtbar solange `jetzt <= deadline` gilt. Danach liefert `get` nichts
//! mehr und entfernt den Eintrag beim Zugriff. Fuer Eintraege, die nie wieder
//! gelesen werden, kann der Cache selbst periodisch aufraeumen
//! (`mit_bereinigung`).

use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::Instant;

use crate::error::{CacheError, CacheResult};
use crate::KvCache;

#[derive(Debug, Clone)]
struct Eintrag {
    wert: String,
    deadline: Instant,
}

impl Eintrag {
    fn lebt(&self, jetzt: Instant) -> bool {
        jetzt <= self.deadline
    }
}

/// Cache im Prozessspeicher
#[derive(Debug, Default)]
pub struct SpeicherCache {
    eintraege: DashMap<String, Eintrag>,
}

impl SpeicherCache {
    /// Erstellt einen neuen leeren Cache
    pub fn neu() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Startet einen Hintergrund-Task, der abgelaufene Eintraege im
    /// angegebenen Intervall entfernt. Der Task endet mit dem Cache.
    pub fn mit_bereinigung(cache: Arc<Self>, intervall: Duration) -> Arc<Self> {
        let schwach: Weak<Self> = Arc::downgrade(&cache);
        tokio::spawn(async move {
            let mut takt = tokio::time::interval(intervall);
            takt.tick().await;
            loop {
                takt.tick().await;
                let Some(cache) = schwach.upgrade() else { break };
                let entfernt = cache.abgelaufene_entfernen();
                if entfernt > 0 {
                    tracing::debug!(anzahl = entfernt, "Abgelaufene Cache-Eintraege entfernt");
                }
            }
        });
        cache
    }

    /// Entfernt alle abgelaufenen Eintraege und gibt deren Anzahl zurueck
    pub fn abgelaufene_entfernen(&self) -> usize {
        let jetzt = Instant::now();
        let vorher = self.eintraege.len();
        self.eintraege.retain(|_, e| e.lebt(jetzt));
        vorher.saturating_sub(self.eintraege.len())
    }

    /// Anzahl der lebenden Eintraege
    pub fn anzahl_aktive(&self) -> usize {
        let jetzt = Instant::now();
        self.eintraege.iter().filter(|e| e.lebt(jetzt)).count()
    }
}

#[async_trait]
impl KvCache for SpeicherCache {
    async fn set_mit_ttl(&self, key: &str, wert: String, ttl: Duration) -> CacheResult<()> {
        if ttl.is_zero() {
            return Err(CacheError::UngueltigeTtl("TTL muss groesser als 0 sein".into()));
        }
        let deadline = Instant::now()
            .checked_add(ttl)
            .ok_or_else(|| CacheError::UngueltigeTtl(format!("{ttl:?} ist zu gross")))?;

        self.eintraege
            .insert(key.to_string(), Eintrag { wert, deadline });
        Ok(())
    }

    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let jetzt = Instant::now();

        if let Some(eintrag) = self.eintraege.get(key) {
            if eintrag.lebt(jetzt) {
                return Ok(Some(eintrag.wert.clone()));
            }
        } else {
            return Ok(None);
        }

        // Abgelaufen: beim Zugriff entfernen
        self.eintraege.remove_if(key, |_, e| !e.lebt(jetzt));
        Ok(None)
    }

    async fn delete(&self, key: &str) -> CacheResult<bool> {
        let jetzt = Instant::now();
        Ok(self
            .eintraege
            .remove(key)
            .is_some_and(|(_, e)| e.lebt(jetzt)))
    }
}
