//! Pendulum state snapshot

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

/// Angular position, velocity and time of the pendulum
///
/// A plain value: every step produces a new one, and copies handed out to
/// readers never alias the model's own state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PendulumState {
    /// Angle from equilibrium (rad)
    pub theta: f64,
    /// Angular velocity (rad/s)
    pub theta_dot: f64,
    /// Simulation time (s)
    pub time: f64,
}

impl PendulumState {
    pub const ZERO: PendulumState = PendulumState {
        theta: 0.0,
        theta_dot: 0.0,
        time: 0.0,
    };

    pub fn new(theta: f64, theta_dot: f64, time: f64) -> Self {
        Self {
            theta,
            theta_dot,
            time,
        }
    }

    /// At rest at `theta`, time zero
    pub fn at_angle(theta: f64) -> Self {
        Self::new(theta, 0.0, 0.0)
    }

    /// `[theta, theta_dot]` as consumed by the solvers
    pub fn as_vector(&self) -> DVector<f64> {
        DVector::from_vec(vec![self.theta, self.theta_dot])
    }

    /// Inverse of [`as_vector`](Self::as_vector)
    ///
    /// # Panics
    ///
    /// If `y` has fewer than two entries.
    pub fn from_vector(y: &DVector<f64>, time: f64) -> Self {
        debug_assert_eq!(y.len(), 2, "pendulum state is [theta, theta_dot]");
        Self::new(y[0], y[1], time)
    }
}
