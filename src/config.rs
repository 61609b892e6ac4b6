//! Simulation configuration

use serde::{Deserialize, Serialize};

use crate::driver::{check_fall_boundary, SimulationDriver};
use crate::error::{PendulumError, Result};
use crate::pendulum::{PendulumModel, PendulumState, PhysicsParameters, Polarity};
use crate::solvers::SolverType;

/// Step size synchronised with a 60 Hz render loop
pub const RENDER_DT: f64 = 1.0 / 60.0;

/// Step size of the recorded reference traces (500 Hz)
pub const TRACE_DT: f64 = 0.002;

/// Everything needed to build a model and its driver
///
/// Missing fields take their defaults when deserialised:
///
/// ```
/// use pendulum_sim::config::SimulationConfig;
///
/// let config = SimulationConfig::from_json_str(r#"{ "dt": 0.002, "polarity": "Inverted" }"#).unwrap();
/// assert_eq!(config.dt, 0.002);
/// assert_eq!(config.params.gravity, 9.81);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationConfig {
    /// Fixed step size (s)
    pub dt: f64,

    /// One-step integration scheme
    pub solver: SolverType,

    pub polarity: Polarity,

    pub params: PhysicsParameters,

    /// Starting angle, at rest (rad)
    pub initial_angle: f64,

    /// Clamp `|theta|` here after each step, zeroing the velocity (rad)
    pub fall_boundary: Option<f64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt: RENDER_DT,
            solver: SolverType::RK4,
            polarity: Polarity::Stable,
            params: PhysicsParameters::default(),
            initial_angle: 0.0,
            fall_boundary: None,
        }
    }
}

impl SimulationConfig {
    /// Render-synchronised play: 60 Hz
    pub fn render_rate() -> Self {
        Self::default()
    }

    /// Trace comparison against 500 Hz reference data
    pub fn trace_rate() -> Self {
        Self {
            dt: TRACE_DT,
            polarity: Polarity::Inverted,
            initial_angle: 0.05,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(PendulumError::InvalidTimestep(self.dt));
        }
        if !self.initial_angle.is_finite() {
            return Err(PendulumError::NonFiniteParameter {
                name: "initialAngle",
            });
        }
        if let Some(boundary) = self.fall_boundary {
            check_fall_boundary(boundary)?;
        }
        self.params.validate()
    }

    pub fn build_model(&self) -> Result<PendulumModel> {
        self.validate()?;
        Ok(PendulumModel::new(self.params, self.polarity)?
            .with_solver(self.solver)
            .with_state(PendulumState::at_angle(self.initial_angle)))
    }

    /// Model and driver; attach series with the driver's builders
    pub fn build_driver(&self) -> Result<SimulationDriver> {
        let mut driver = SimulationDriver::new(self.build_model()?, self.dt)?;
        driver.set_fall_boundary(self.fall_boundary)?;
        Ok(driver)
    }
}
