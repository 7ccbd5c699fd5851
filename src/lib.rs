pub mod models;
pub mod db;
pub mod auth;
pub mod config;
pub mod domain;
pub mod api;
pub mod telemetry;

// Re-export commonly used types
pub use models::{
    Commune, Demographic, Patient, Sospecha, SuspectCase, User,
    CaseResponse, PatientLookup, UserLookup,
};

pub use db::{create_pool, create_lazy_pool, health_check, DatabaseError};

pub use config::{AppConfig, AuthConfig, ConfigError, DatabaseConfig, TelemetryConfig};

pub use domain::{resolve_patient, DomainError};
