//! SQLite-Backend fuer den Benutzer-Store

pub mod pool;
pub mod users;

pub use pool::SqliteDb;
