//! Shared domain types and pure logic for the outreach pipeline.
//!
//! Holds the `Prospect` record and its lifecycle states, the pain-point
//! signal vocabulary, the deterministic pain-point classifier, the persona
//! catalog (loaded from `config/personas.yaml`), and application
//! configuration loading.

pub mod app_config;
pub mod classifier;
pub mod config;
pub mod personas;
pub mod prospect;
pub mod signals;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use classifier::{classify, PainPoint, DEFAULT_PRIORITY};
pub use config::{load_app_config, load_app_config_from_env};
pub use personas::{Persona, PersonaCatalog};
pub use prospect::{
    OutreachEmail, PerformanceScores, Prospect, Review, SendStatus, SentimentSummary,
};
pub use signals::{PainPointSignal, SignalKind, SignalSource};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read personas file {path}: {source}")]
    PersonasFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse personas file: {0}")]
    PersonasFileParse(#[from] serde_yaml::Error),

    #[error("personas validation failed: {0}")]
    Validation(String),
}
