//! Passwort-Hashing mit Argon2id
//!
//! Der Hash ist ein PHC-String und traegt Algorithmus, Parameter und Salt
//! selbst. Verifiziert wird deshalb immer mit den Parametern aus dem
//! gespeicherten Hash, nicht mit den aktuell konfigurierten.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::error::{AuthError, AuthResult};

/// Einweg-Hash fuer Passwoerter
pub trait CredentialHasher: Send + Sync {
    /// Hasht `passwort` mit frischem Salt
    fn hash(&self, passwort: &str) -> AuthResult<String>;

    /// `true` wenn `passwort` zu `digest` passt. Ein Fehlversuch ist kein
    /// Fehler, sondern `false`.
    fn verify(&self, digest: &str, passwort: &str) -> bool;
}

/// Argon2id-Parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Parameter {
    /// Speicherbedarf in KiB
    pub speicher_kib: u32,
    pub iterationen: u32,
    pub parallelitaet: u32,
}

impl Default for Argon2Parameter {
    /// Werte gemaess OWASP-Empfehlungen: 64 MiB, 3 Iterationen, 1 Thread
    fn default() -> Self {
        Self {
            speicher_kib: 64 * 1024,
            iterationen: 3,
            parallelitaet: 1,
        }
    }
}

/// `CredentialHasher` auf Basis von Argon2id (v0x13)
#[derive(Clone)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    pub fn neu(parameter: Argon2Parameter) -> AuthResult<Self> {
        let params = Params::new(
            parameter.speicher_kib,
            parameter.iterationen,
            parameter.parallelitaet,
            None, // output_len: Standard (32 Bytes)
        )
        .map_err(|e| AuthError::intern(format!("Argon2-Parameter ungueltig: {e}")))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl std::fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argon2Hasher").finish_non_exhaustive()
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, passwort: &str) -> AuthResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(passwort.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::PasswortHashing(e.to_string()))
    }

    fn verify(&self, digest: &str, passwort: &str) -> bool {
        let parsed_hash = match PasswordHash::new(digest) {
            Ok(h) => h,
            Err(e) => {
                tracing::error!(fehler = %e, "Gespeicherter Passwort-Hash nicht lesbar");
                return false;
            }
        };

        self.argon2
            .verify_password(passwort.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schneller_hasher() -> Argon2Hasher {
        Argon2Hasher::neu(Argon2Parameter {
            speicher_kib: 256,
            iterationen: 1,
            parallelitaet: 1,
        })
        .unwrap()
    }

    #[test]
    fn passwort_hashen_und_verifizieren() {
        let hasher = schneller_hasher();
        let passwort = "sicheres_passwort_123!";
        let hash = hasher.hash(passwort).expect("Hashing fehlgeschlagen");

        assert!(
            hash.starts_with("$argon2id$"),
            "Hash muss mit $argon2id$ beginnen"
        );
        assert!(!hash.contains(passwort));
        assert!(hasher.verify(&hash, passwort), "Passwort muss korrekt verifiziert werden");
    }

    #[test]
    fn falsches_passwort_wird_abgelehnt() {
        let hasher = schneller_hasher();
        let hash = hasher.hash("richtiges_passwort").unwrap();

        assert!(!hasher.verify(&hash, "falsches_passwort"));
        assert!(!hasher.verify(&hash, "richtiges_passwort "));
        assert!(!hasher.verify(&hash, ""));
    }

    #[test]
    fn gleiche_passwoerter_unterschiedliche_hashes() {
        let hasher = schneller_hasher();
        let hash1 = hasher.hash("gleiches_passwort").unwrap();
        let hash2 = hasher.hash("gleiches_passwort").unwrap();

        assert_ne!(hash1, hash2, "Salt muss pro Hash neu sein");
    }

    #[test]
    fn ungueltiger_hash_ist_nur_false() {
        let hasher = schneller_hasher();
        assert!(!hasher.verify("kein_gueltiger_hash", "passwort"));
    }

    #[test]
    fn verifikation_nutzt_parameter_aus_dem_hash() {
        let alt = schneller_hasher();
        let hash = alt.hash("passwort").unwrap();

        let neu = Argon2Hasher::neu(Argon2Parameter {
            speicher_kib: 512,
            iterationen: 2,
            parallelitaet: 1,
        })
        .unwrap();
        assert!(neu.verify(&hash, "passwort"));
    }

    #[test]
    fn ungueltige_parameter_werden_abgelehnt() {
        let ergebnis = Argon2Hasher::neu(Argon2Parameter {
            speicher_kib: 1,
            iterationen: 0,
            parallelitaet: 1,
        });
        assert!(matches!(ergebnis, Err(AuthError::Intern(_))));
    }
}
