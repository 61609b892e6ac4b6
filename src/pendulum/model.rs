//! Parametric pendulum model

use log::debug;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use super::{Coefficients, PendulumState, PhysicsParameters};
use crate::error::Result;
use crate::solvers::{OneStepSolver, SolverType};

/// Sign convention of the gravity and spring terms
///
/// The acceleration is
/// ```text
/// theta'' = s*ka*sin(theta) - s*ks*theta - kb*theta' + drive(t)
/// ```
/// with `s = -1` for `Stable` (gravity restores toward theta = 0) and
/// `s = +1` for `Inverted` (gravity topples away from theta = 0, the spring
/// holds it up). Damping and drive are the same for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Polarity {
    #[default]
    Stable,
    Inverted,
}

impl Polarity {
    /// `s` in the acceleration formula
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Polarity::Stable => -1.0,
            Polarity::Inverted => 1.0,
        }
    }
}

/// Damped, optionally driven pendulum
///
/// Holds parameters, polarity, the integration scheme and the current state.
/// Coefficients are derived from the parameters on every derivative
/// evaluation, so parameter changes take effect at the very next evaluation.
#[derive(Debug, Clone)]
pub struct PendulumModel {
    params: PhysicsParameters,
    polarity: Polarity,
    solver: SolverType,
    state: PendulumState,
}

impl PendulumModel {
    /// Create a model at rest at theta = 0, integrated with RK4
    ///
    /// Fails if the parameters are non-finite or the effective inertia is not
    /// positive.
    pub fn new(params: PhysicsParameters, polarity: Polarity) -> Result<Self> {
        params.validate()?;
        debug!(
            "pendulum model created: polarity={:?}, params={:?}",
            polarity, params
        );
        Ok(Self {
            params,
            polarity,
            solver: SolverType::default(),
            state: PendulumState::ZERO,
        })
    }

    /// Use a different integration scheme
    pub fn with_solver(mut self, solver: SolverType) -> Self {
        self.solver = solver;
        self
    }

    /// Start from `state` instead of rest
    pub fn with_state(mut self, state: PendulumState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> PendulumState {
        self.state
    }

    /// Replace the state wholesale
    pub fn set_state(&mut self, state: PendulumState) {
        self.state = state;
    }

    pub fn params(&self) -> &PhysicsParameters {
        &self.params
    }

    /// Replace the parameters
    ///
    /// Invalid parameters are rejected and the previous set stays in force.
    pub fn set_params(&mut self, params: PhysicsParameters) -> Result<()> {
        params.validate()?;
        debug!("pendulum parameters updated: {:?}", params);
        self.params = params;
        Ok(())
    }

    /// Edit a copy of the parameters and commit it if it validates
    ///
    /// ```
    /// # use pendulum_sim::prelude::*;
    /// let mut model = PendulumModel::new(PhysicsParameters::default(), Polarity::Stable).unwrap();
    /// model.update_params(|p| p.damping = 0.0).unwrap();
    /// assert_eq!(model.params().damping, 0.0);
    /// assert!(model.update_params(|p| { p.mass = 0.0; p.moment_of_inertia = 0.0 }).is_err());
    /// assert_eq!(model.params().mass, 1.0);
    /// ```
    pub fn update_params<F>(&mut self, edit: F) -> Result<()>
    where
        F: FnOnce(&mut PhysicsParameters),
    {
        let mut params = self.params;
        edit(&mut params);
        self.set_params(params)
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn solver(&self) -> SolverType {
        self.solver
    }

    /// Coefficients for the current parameters
    pub fn coefficients(&self) -> Coefficients {
        self.params.coefficients()
    }

    /// Angular acceleration at time `t` for the given angle and velocity
    pub fn acceleration(&self, t: f64, theta: f64, theta_dot: f64) -> f64 {
        let Coefficients { ka, ks, kb } = self.params.coefficients();
        let s = self.polarity.sign();
        // s is ±1, so its reciprocal on the spring term is s itself
        s * ka * theta.sin() - s * ks * theta - kb * theta_dot + self.params.drive(t)
    }

    /// `d/dt [theta, theta_dot]`
    ///
    /// # Panics
    ///
    /// If `y` has fewer than two entries.
    pub fn derivative(&self, t: f64, y: &DVector<f64>) -> DVector<f64> {
        debug_assert_eq!(y.len(), 2, "pendulum state is [theta, theta_dot]");
        DVector::from_vec(vec![y[1], self.acceleration(t, y[0], y[1])])
    }

    /// Advance the state by one solver step of size `dt`
    pub fn step(&mut self, dt: f64) -> PendulumState {
        let t0 = self.state.time;
        let y0 = self.state.as_vector();
        let y1 = self
            .solver
            .integrate(|t, y| self.derivative(t, y), t0, &y0, dt);
        self.state = PendulumState::from_vector(&y1, t0 + dt);
        self.state
    }

    /// Instantaneous kick: adds `delta` to the angular velocity
    pub fn apply_force(&mut self, delta: f64) {
        self.state.theta_dot += delta;
    }

    /// Back to rest at theta = 0, time zero
    pub fn reset(&mut self) {
        self.state = PendulumState::ZERO;
    }

    /// Back to rest at `angle`, time zero
    pub fn reset_to(&mut self, angle: f64) {
        self.state = PendulumState::at_angle(angle);
    }

    /// `½ (m L² + I) ω²`
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.params.effective_inertia() * self.state.theta_dot.powi(2)
    }

    /// Gravity and spring potential, zero at theta = 0
    pub fn potential_energy(&self) -> f64 {
        let p = &self.params;
        let s = self.polarity.sign();
        let theta = self.state.theta;
        s * p.mass * p.gravity * p.length * (theta.cos() - 1.0)
            + 0.5 * s * p.spring_constant * theta * theta
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn model(polarity: Polarity) -> PendulumModel {
        PendulumModel::new(PhysicsParameters::default(), polarity).unwrap()
    }

    #[test]
    fn test_new_starts_at_rest() {
        let m = model(Polarity::Stable);
        assert_eq!(m.state(), PendulumState::ZERO);
        assert_eq!(m.solver(), SolverType::RK4);
    }

    #[test]
    fn test_new_rejects_singular_inertia() {
        let params = PhysicsParameters {
            mass: 1.0,
            length: 1.0,
            moment_of_inertia: -1.0,
            ..PhysicsParameters::default()
        };
        assert!(PendulumModel::new(params, Polarity::Stable).is_err());
    }

    #[test]
    fn test_step_zero_is_identity() {
        let mut m = model(Polarity::Inverted).with_state(PendulumState::new(0.3, -0.7, 1.25));
        let before = m.state();
        let after = m.step(0.0);
        assert_eq!(after, before);
    }

    #[test]
    fn test_step_advances_time() {
        let mut m = model(Polarity::Stable);
        m.reset_to(0.1);
        m.step(0.01);
        m.step(0.01);
        assert_relative_eq!(m.state().time, 0.02, epsilon = 1e-15);
    }

    #[test]
    fn test_apply_force_only_changes_velocity() {
        let mut m = model(Polarity::Stable).with_state(PendulumState::new(0.4, 1.0, 2.0));
        m.apply_force(0.75);
        assert_eq!(m.state(), PendulumState::new(0.4, 1.75, 2.0));
    }

    #[test]
    fn test_reset() {
        let mut m = model(Polarity::Stable).with_state(PendulumState::new(0.4, 1.0, 2.0));
        m.reset();
        assert_eq!(m.state(), PendulumState::ZERO);
        m.set_state(PendulumState::new(0.4, 1.0, 2.0));
        m.reset_to(0.2);
        assert_eq!(m.state(), PendulumState::new(0.2, 0.0, 0.0));
    }

    #[test]
    fn test_set_params_rejects_and_keeps_previous() {
        let mut m = model(Polarity::Stable);
        let bad = PhysicsParameters {
            mass: 0.0,
            moment_of_inertia: 0.0,
            ..PhysicsParameters::default()
        };
        assert!(m.set_params(bad).is_err());
        assert!(m.update_params(|p| p.damping = -5.0).is_err());
        assert!(m.update_params(|p| p.length = -1.0).is_err());
        assert_eq!(*m.params(), PhysicsParameters::default());
    }

    #[test]
    #[should_panic]
    fn test_derivative_of_short_vector_panics() {
        model(Polarity::Stable).derivative(0.0, &DVector::from_vec(vec![0.1]));
    }

    #[test]
    fn test_polarity_flips_gravity_and_spring_only() {
        let params = PhysicsParameters {
            damping: 0.3,
            spring_constant: 0.7,
            drive_amplitude: 0.4,
            drive_frequency: 1.3,
            ..PhysicsParameters::default()
        };
        let stable = PendulumModel::new(params, Polarity::Stable).unwrap();
        let inverted = PendulumModel::new(params, Polarity::Inverted).unwrap();
        let c = params.coefficients();

        let (t, theta, omega): (f64, f64, f64) = (0.37, 0.6, -1.1);
        let shared = -c.kb * omega + params.drive(t);
        let gravity = c.ka * theta.sin();
        let spring = c.ks * theta;

        assert_relative_eq!(
            stable.acceleration(t, theta, omega),
            -gravity + spring + shared,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            inverted.acceleration(t, theta, omega),
            gravity - spring + shared,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_live_parameter_change_applies_next_step() {
        let mut m = model(Polarity::Stable);
        m.reset_to(0.2);
        let a_before = m.acceleration(0.0, 0.2, 0.0);
        m.update_params(|p| p.gravity = 2.0 * p.gravity).unwrap();
        let a_after = m.acceleration(0.0, 0.2, 0.0);
        assert_relative_eq!(a_after, 2.0 * a_before, epsilon = 1e-12);
    }

    #[test]
    fn test_energy_at_rest_is_zero() {
        let m = model(Polarity::Inverted);
        assert_eq!(m.total_energy(), 0.0);
    }

    #[test]
    fn test_kinetic_energy_uses_effective_inertia() {
        let m = model(Polarity::Stable).with_state(PendulumState::new(0.0, 2.0, 0.0));
        // (1 * 1 + 1) / 2 * 4
        assert_relative_eq!(m.kinetic_energy(), 4.0, epsilon = 1e-12);
    }
}
