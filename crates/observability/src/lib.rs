//! # pforte-observability
//!
//! Observability-Crate fuer Pforte:
//! - Health-Check-Endpunkt (`/health`)
//! - Structured Logging (Text oder JSON) via tracing-subscriber

pub mod health;
pub mod logging;

pub use health::{health_router, Bereitschaft, HealthResponse, HealthState, HealthStatus};
pub use logging::logging_initialisieren;
