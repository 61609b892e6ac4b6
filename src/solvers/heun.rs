//! Heun's method (improved Euler)

use nalgebra::DVector;

use super::OneStepSolver;

/// Two-stage, 2nd order explicit Runge-Kutta method
///
/// Takes a forward Euler trial step, then averages the slopes at both ends of
/// the interval. Also known as the improved Euler or explicit trapezoidal rule.
///
/// # Characteristics
/// - Order: 2
/// - Stages: 2
/// - Explicit, fixed timestep
///
/// # References
/// - Süli, E., & Mayers, D. (2003). "An Introduction to Numerical Analysis".
///   Cambridge University Press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Heun;

impl OneStepSolver for Heun {
    fn integrate<F>(&self, mut f: F, t0: f64, y0: &DVector<f64>, dt: f64) -> DVector<f64>
    where
        F: FnMut(f64, &DVector<f64>) -> DVector<f64>,
    {
        if dt == 0.0 {
            return y0.clone();
        }

        // c = [0, 1]
        // a = [[],
        //      [1]]
        // b = [1/2, 1/2]
        let k1 = f(t0, y0);
        let trial = y0 + dt * &k1;
        let k2 = f(t0 + dt, &trial);

        y0 + (0.5 * dt) * (k1 + k2)
    }

    fn order(&self) -> usize {
        2
    }

    fn stages(&self) -> usize {
        2
    }

    fn name(&self) -> &'static str {
        "Heun"
    }
}
