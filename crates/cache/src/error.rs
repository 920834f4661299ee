//! Fehlertypen fuer den Cache

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache nicht erreichbar: {0}")]
    NichtErreichbar(String),

    #[error("Ungueltige TTL: {0}")]
    UngueltigeTtl(String),
}

/// Result-Alias fuer den Cache
pub type CacheResult<T> = Result<T, CacheError>;
