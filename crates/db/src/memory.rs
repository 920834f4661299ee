//! In-Memory-Implementierung des UserStore
//!
//! Haelt alle Benutzer in einer `HashMap` hinter einem Mutex. Pruefung und
//! Einfuegen passieren unter demselben Lock, damit gleichzeitige
//! Registrierungen mit derselben E-Mail nicht beide durchkommen.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use pforte_core::UserId;

use crate::error::{DbError, DbResult};
use crate::models::{email_normalisieren, User, UserDraft};
use crate::repository::UserStore;

#[derive(Debug, Default)]
pub struct SpeicherDb {
    benutzer: Mutex<HashMap<UserId, User>>,
}

impl SpeicherDb {
    pub fn neu() -> Self {
        Self::default()
    }

    pub fn anzahl(&self) -> usize {
        self.benutzer.lock().len()
    }
}

#[async_trait]
impl UserStore for SpeicherDb {
    async fn create(&self, entwurf: UserDraft) -> DbResult<User> {
        let email = email_normalisieren(&entwurf.email);
        let mut benutzer = self.benutzer.lock();

        if benutzer.values().any(|u| u.email == email) {
            return Err(DbError::EmailVergeben(email));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            first_name: entwurf.first_name,
            last_name: entwurf.last_name,
            email,
            password_hash: entwurf.password_hash,
            created_at: now,
            updated_at: now,
        };
        benutzer.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> DbResult<User> {
        self.benutzer
            .lock()
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::nicht_gefunden(format!("User {id}")))
    }

    async fn find_by_email(&self, email: &str) -> DbResult<User> {
        let email = email_normalisieren(email);
        self.benutzer
            .lock()
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| DbError::nicht_gefunden(format!("User mit E-Mail {email}")))
    }
}
