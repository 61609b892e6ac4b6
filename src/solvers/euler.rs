//! Forward Euler method for numerical integration

use nalgebra::DVector;

use super::OneStepSolver;

/// Explicit forward Euler method
///
/// First-order, single-stage explicit integration method.
///
/// # Mathematical Form
/// ```text
/// x_{n+1} = x_n + h * f(t_n, x_n)
/// ```
///
/// # Characteristics
/// - Order: 1
/// - Stages: 1
/// - Explicit, fixed timestep
/// - Not A-stable
///
/// # Note
/// The cheapest solver per step but also the least accurate. An undamped
/// pendulum gains energy every step under Euler, so prefer RK4 for anything
/// that runs longer than a few periods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euler;

impl OneStepSolver for Euler {
    fn integrate<F>(&self, mut f: F, t0: f64, y0: &DVector<f64>, dt: f64) -> DVector<f64>
    where
        F: FnMut(f64, &DVector<f64>) -> DVector<f64>,
    {
        if dt == 0.0 {
            return y0.clone();
        }
        y0 + dt * f(t0, y0)
    }

    fn order(&self) -> usize {
        1
    }

    fn stages(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "Euler"
    }
}
