//! Numerical integration solvers
//!
//! Provides fixed-step, one-step explicit schemes:
//! - Forward Euler (order 1)
//! - Heun / improved Euler (order 2)
//! - Classical Runge-Kutta RK4 (order 4)
//!
//! Every scheme implements [`OneStepSolver`]; [`SolverType`] selects one at
//! runtime without changing the call site.

mod base;
mod euler;
mod heun;
mod rk4;

pub use base::*;
pub use euler::Euler;
pub use heun::Heun;
pub use rk4::RK4;
