//! pforte-auth – Anmeldung und Sessions
//!
//! Dieses Crate implementiert:
//! - Passwort-Hashing mit Argon2id (`CredentialHasher`)
//! - Token-Store fuer undurchsichtige Session-Tokens mit TTL
//! - SessionManager (Registrierung, Login, Authentifizierung, Profil, Logout)

pub mod error;
pub mod password;
pub mod service;
pub mod token;

// Bequeme Re-Exporte
pub use error::{AuthError, AuthResult, FehlerArt};
pub use password::{Argon2Hasher, Argon2Parameter, CredentialHasher};
pub use service::{LoginRequest, RegisterRequest, SessionConfig, SessionGrant, SessionManager};
pub use token::{Token, TokenStore};

// Profilansicht, die Registrierung und Login zurueckgeben
pub use pforte_db::UserProfile;
