//! pforte-core – Gemeinsame Typen fuer alle Pforte-Crates
//!
//! Enthaelt die Benutzer-ID als Newtype und den Anfragekontext, der
//! Zeitlimit und Abbruch einer einzelnen Anfrage bis in die Stores traegt.

pub mod context;
pub mod types;

// Re-Exporte fuer bequemen Zugriff
pub use context::{KontextFehler, RequestContext};
pub use types::{UngueltigeUserId, UserId};
