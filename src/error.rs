//! Error types

use thiserror::Error;

/// Errors raised when building or reconfiguring a simulation
#[derive(Error, Debug)]
pub enum PendulumError {
    #[error(
        "Effective inertia mass*length^2 + moment_of_inertia must be positive \
         (mass={mass}, length={length}, moment_of_inertia={moment_of_inertia})"
    )]
    SingularInertia {
        mass: f64,
        length: f64,
        moment_of_inertia: f64,
    },

    #[error("Parameter `{name}` must be {expected}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("Parameter `{name}` is not finite")]
    NonFiniteParameter { name: &'static str },

    #[error("Timestep must be finite and positive, got {0}")]
    InvalidTimestep(f64),

    #[error("Sample {index} is out of order or has a non-finite timestamp")]
    UnorderedSeries { index: usize },

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PendulumError>;
