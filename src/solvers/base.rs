//! Base solver traits and types

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use super::{Euler, Heun, RK4};

/// One-step integration scheme for a vector ODE `dy/dt = f(t, y)`
///
/// Implementations hold no state between calls: the result depends only on
/// the derivative function, the initial time and state, and the step size.
/// A zero step returns the initial state unchanged.
pub trait OneStepSolver {
    /// Advance `y0` from `t0` to `t0 + dt`
    fn integrate<F>(&self, f: F, t0: f64, y0: &DVector<f64>, dt: f64) -> DVector<f64>
    where
        F: FnMut(f64, &DVector<f64>) -> DVector<f64>;

    /// Order of the method
    fn order(&self) -> usize;

    /// Number of derivative evaluations per step
    fn stages(&self) -> usize;

    /// Human readable scheme name
    fn name(&self) -> &'static str;
}

/// Available one-step schemes
///
/// Selected once (usually at model construction) and dispatched through
/// [`SolverType::integrate`], so call sites never change when the scheme does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SolverType {
    /// Forward Euler (1st order)
    Euler,
    /// Heun's method / improved Euler (2nd order)
    Heun,
    /// Classical RK4 (4th order)
    #[default]
    RK4,
}

impl SolverType {
    /// All schemes, lowest order first
    pub const ALL: [SolverType; 3] = [SolverType::Euler, SolverType::Heun, SolverType::RK4];

    pub fn as_str(&self) -> &'static str {
        match self {
            SolverType::Euler => Euler.name(),
            SolverType::Heun => Heun.name(),
            SolverType::RK4 => RK4.name(),
        }
    }
}

impl OneStepSolver for SolverType {
    fn integrate<F>(&self, f: F, t0: f64, y0: &DVector<f64>, dt: f64) -> DVector<f64>
    where
        F: FnMut(f64, &DVector<f64>) -> DVector<f64>,
    {
        match self {
            SolverType::Euler => Euler.integrate(f, t0, y0, dt),
            SolverType::Heun => Heun.integrate(f, t0, y0, dt),
            SolverType::RK4 => RK4.integrate(f, t0, y0, dt),
        }
    }

    fn order(&self) -> usize {
        match self {
            SolverType::Euler => Euler.order(),
            SolverType::Heun => Heun.order(),
            SolverType::RK4 => RK4.order(),
        }
    }

    fn stages(&self) -> usize {
        match self {
            SolverType::Euler => Euler.stages(),
            SolverType::Heun => Heun.stages(),
            SolverType::RK4 => RK4.stages(),
        }
    }

    fn name(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for SolverType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
