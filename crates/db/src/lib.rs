//! pforte-db – Benutzer-Store
//!
//! Das Repository-Pattern entkoppelt den Session-Manager vom konkreten
//! Speicher. `SqliteDb` ist das dauerhafte Backend, `SpeicherDb` haelt alles
//! im Prozess (Tests, Entwicklung).

pub mod error;
pub mod memory;
pub mod models;
pub mod repository;
pub mod sqlite;

pub use error::{DbError, DbResult};
pub use memory::SpeicherDb;
pub use models::{email_normalisieren, User, UserDraft, UserProfile};
pub use repository::{DatabaseConfig, UserStore};
pub use sqlite::SqliteDb;
