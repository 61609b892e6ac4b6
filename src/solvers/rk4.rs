//! Classic 4th-order Runge-Kutta solver (RK4)

use nalgebra::DVector;

use super::OneStepSolver;

/// Classic 4th-order Runge-Kutta solver
///
/// The workhorse fixed-step explicit method. Four-stage, 4th order accuracy,
/// local truncation error O(dt^5). All state components are advanced together,
/// so coupled dynamics see a consistent intermediate state at every stage.
///
/// # Characteristics
/// - Order: 4
/// - Stages: 4
/// - Explicit, fixed timestep
/// - Not A-stable
///
/// # References
/// - Kutta, W. (1901). "Beitrag zur näherungsweisen Integration totaler
///   Differentialgleichungen". Zeitschrift für Mathematik und Physik, 46, 435-453.
/// - Butcher, J. C. (2016). "Numerical Methods for Ordinary Differential
///   Equations". John Wiley & Sons, 3rd Edition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RK4;

impl OneStepSolver for RK4 {
    fn integrate<F>(&self, mut f: F, t0: f64, y0: &DVector<f64>, dt: f64) -> DVector<f64>
    where
        F: FnMut(f64, &DVector<f64>) -> DVector<f64>,
    {
        if dt == 0.0 {
            return y0.clone();
        }

        // RK4 Butcher tableau
        // c = [0, 1/2, 1/2, 1]
        // a = [[],
        //      [1/2],
        //      [0, 1/2],
        //      [0, 0, 1]]
        // b = [1/6, 1/3, 1/3, 1/6]
        let half = 0.5 * dt;

        let k1 = f(t0, y0);
        let k2 = f(t0 + half, &(y0 + half * &k1));
        let k3 = f(t0 + half, &(y0 + half * &k2));
        let k4 = f(t0 + dt, &(y0 + dt * &k3));

        y0 + (dt / 6.0) * (k1 + 2.0 * k2 + 2.0 * k3 + k4)
    }

    fn order(&self) -> usize {
        4
    }

    fn stages(&self) -> usize {
        4
    }

    fn name(&self) -> &'static str {
        "RK4"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rk4_exponential_decay() {
        // dx/dt = -x, x(0) = 1
        // Exact solution: x(t) = exp(-t)
        let mut x = DVector::from_vec(vec![1.0]);

        let dt = 0.1;
        let t_final = 1.0;
        let n_steps = (t_final / dt) as usize;

        for i in 0..n_steps {
            x = RK4.integrate(|_t, x| -x, i as f64 * dt, &x, dt);
        }

        let exact = (-t_final).exp();
        assert_relative_eq!(x[0], exact, epsilon = 1e-6);
    }

    #[test]
    fn test_rk4_harmonic_oscillator() {
        // d²x/dt² = -x => [x, v]' = [v, -x]
        // Exact: x(t) = cos(t), v(t) = -sin(t)
        let mut x = DVector::from_vec(vec![1.0, 0.0]);

        let n_steps = 1000;
        let dt = 2.0 * std::f64::consts::PI / n_steps as f64;

        for i in 0..n_steps {
            x = RK4.integrate(
                |_t, x| DVector::from_vec(vec![x[1], -x[0]]),
                i as f64 * dt,
                &x,
                dt,
            );
        }

        // After one period, should return to initial state
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-9);
        assert_relative_eq!(x[1], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rk4_zero_step_is_identity() {
        let x0 = DVector::from_vec(vec![0.3, -1.2]);
        let x1 = RK4.integrate(|_t, x| x * 100.0, 4.0, &x0, 0.0);
        assert_eq!(x1, x0);
    }

    #[test]
    fn test_rk4_stage_times() {
        // Records the times the derivative is sampled at
        let mut times = Vec::new();
        let x0 = DVector::from_vec(vec![0.0]);
        RK4.integrate(
            |t, _x| {
                times.push(t);
                DVector::from_vec(vec![1.0])
            },
            1.0,
            &x0,
            0.5,
        );
        assert_eq!(times, vec![1.0, 1.25, 1.25, 1.5]);
    }

    #[test]
    fn test_rk4_exact_for_cubic_in_time() {
        // dx/dt = 3t², exact for RK4 (Simpson's rule)
        let x0 = DVector::from_vec(vec![0.0]);
        let x1 = RK4.integrate(|t, _x| DVector::from_vec(vec![3.0 * t * t]), 0.0, &x0, 2.0);
        assert_relative_eq!(x1[0], 8.0, epsilon = 1e-12);
    }
}
