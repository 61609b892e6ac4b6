//! Pendulum dynamics
//!
//! State vector `y = [theta, theta_dot]`; see [`Polarity`] for the
//! acceleration formula.

mod model;
mod params;
mod state;

pub use model::{PendulumModel, Polarity};
pub use params::{Coefficients, PhysicsParameters};
pub use state::PendulumState;
