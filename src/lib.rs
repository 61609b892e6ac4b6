//! Pendulum simulation core
//!
//! Fixed-timestep, deterministic integration of a damped, optionally driven
//! pendulum in two polarities (hanging and inverted), with optional command
//! forcing and comparison against a reference trajectory.
//!
//! # Architecture
//!
//! - [`solvers`]: stateless one-step schemes (Euler, Heun, RK4) behind one trait
//! - [`pendulum`]: parameters, state and the parametric model
//! - [`series`]: time-ordered command and reference samples
//! - [`driver`]: one fixed step per external trigger
//!
//! # Example
//!
//! ```
//! use pendulum_sim::prelude::*;
//!
//! let model = PendulumModel::new(PhysicsParameters::default(), Polarity::Stable)
//!     .unwrap()
//!     .with_state(PendulumState::at_angle(0.1));
//! let mut driver = SimulationDriver::new(model, 1.0 / 60.0).unwrap();
//!
//! for _ in 0..60 {
//!     driver.tick();
//! }
//! assert!((driver.current_time() - 1.0).abs() < 1e-9);
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod pendulum;
pub mod series;
pub mod solvers;

pub use driver::{SimulationDriver, StepReport, TraceSummary, Validation};
pub use error::{PendulumError, Result};
pub use pendulum::{Coefficients, PendulumModel, PendulumState, PhysicsParameters, Polarity};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::SimulationConfig;
    pub use crate::driver::{SimulationDriver, StepReport, TraceSummary, Validation};
    pub use crate::error::{PendulumError, Result};
    pub use crate::pendulum::{
        Coefficients, PendulumModel, PendulumState, PhysicsParameters, Polarity,
    };
    pub use crate::series::{
        CommandSeries, ReferencePoint, ReferenceSeries, Sample, TimeSeries, TimeSeriesSource,
    };
    pub use crate::solvers::{OneStepSolver, SolverType};
}
