//! Fixed-timestep simulation driver
//!
//! The driver is purely reactive: an external periodic trigger (render loop,
//! timer, test harness) calls [`SimulationDriver::tick`], and each call
//! advances the model by exactly one configured `dt`. Each tick:
//!
//! 1. looks up a command sample within `dt / 2` of the current time and, if
//!    found, kicks the angular velocity by `value * kj / dt`;
//! 2. integrates the model by `dt` and advances the driver clock;
//! 3. if a fall boundary is set and `|theta|` passed it, pins the angle at
//!    the boundary and zeroes the velocity;
//! 4. looks up a reference sample within `dt / 2` of the new time and
//!    reports the RMS of the position and velocity errors.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::error::{PendulumError, Result};
use crate::pendulum::{PendulumModel, PendulumState};
use crate::series::{CommandSeries, ReferencePoint, ReferenceSeries, TimeSeriesSource};

/// Comparison of one state against the reference trajectory
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Validation {
    /// `sqrt(((theta - position)² + (theta_dot - velocity)²) / 2)`, or 0 when
    /// no reference sample matched
    pub error: f64,
    /// Whether a reference sample was found
    pub matched: bool,
}

impl Validation {
    /// Result when there is nothing to compare against
    pub const UNMATCHED: Validation = Validation {
        error: 0.0,
        matched: false,
    };

    pub fn compare(state: &PendulumState, reference: &ReferencePoint) -> Self {
        let position = state.theta - reference.position;
        let velocity = state.theta_dot - reference.velocity;
        Self {
            error: ((position * position + velocity * velocity) / 2.0).sqrt(),
            matched: true,
        }
    }
}

/// Outcome of one [`SimulationDriver::tick`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// State after the step
    pub state: PendulumState,
    /// Velocity kick applied before integrating, if a command matched
    pub forcing: Option<f64>,
    /// The step crossed the fall boundary and was clamped
    pub fell: bool,
    pub validation: Validation,
}

/// Aggregate of the validation errors over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceSummary {
    pub steps: usize,
    /// Steps that found a reference sample
    pub matched: usize,
    /// RMS of the matched errors (0 if none matched)
    pub rms_error: f64,
    pub max_error: f64,
    /// Steps clamped at the fall boundary
    pub falls: usize,
}

pub(crate) fn check_fall_boundary(boundary: f64) -> Result<()> {
    if !boundary.is_finite() {
        return Err(PendulumError::NonFiniteParameter {
            name: "fallBoundary",
        });
    }
    if boundary <= 0.0 {
        return Err(PendulumError::OutOfRange {
            name: "fallBoundary",
            value: boundary,
            expected: "positive",
        });
    }
    Ok(())
}

/// Advances a [`PendulumModel`] one fixed step per trigger
#[derive(Debug, Clone)]
pub struct SimulationDriver {
    model: PendulumModel,
    dt: f64,
    current_time: f64,
    initial_angle: f64,
    command: Option<CommandSeries>,
    reference: Option<ReferenceSeries>,
    fall_boundary: Option<f64>,
}

impl SimulationDriver {
    /// Drive `model` with step `dt`
    ///
    /// The model's current angle is remembered as the angle [`reset`](Self::reset)
    /// returns to.
    pub fn new(model: PendulumModel, dt: f64) -> Result<Self> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(PendulumError::InvalidTimestep(dt));
        }
        debug!(
            "simulation driver created: dt={}, solver={}, polarity={:?}",
            dt,
            model.solver(),
            model.polarity()
        );
        let initial_angle = model.state().theta;
        Ok(Self {
            model,
            dt,
            current_time: 0.0,
            initial_angle,
            command: None,
            reference: None,
            fall_boundary: None,
        })
    }

    /// Clamp `|theta|` to `boundary` (rad) after every step
    pub fn with_fall_boundary(mut self, boundary: f64) -> Result<Self> {
        self.set_fall_boundary(Some(boundary))?;
        Ok(self)
    }

    /// Set or clear the fall boundary; it must be finite and positive
    pub fn set_fall_boundary(&mut self, boundary: Option<f64>) -> Result<()> {
        if let Some(b) = boundary {
            check_fall_boundary(b)?;
        }
        self.fall_boundary = boundary;
        Ok(())
    }

    pub fn fall_boundary(&self) -> Option<f64> {
        self.fall_boundary
    }

    pub fn with_command(mut self, command: CommandSeries) -> Self {
        self.set_command(command);
        self
    }

    pub fn with_reference(mut self, reference: ReferenceSeries) -> Self {
        self.set_reference(reference);
        self
    }

    pub fn set_command(&mut self, command: CommandSeries) {
        if command.kj == 0.0 && !command.series.is_empty() {
            warn!(
                "command series with {} samples attached with kj = 0; it will not affect the run",
                command.series.len()
            );
        }
        self.command = Some(command);
    }

    pub fn set_reference(&mut self, reference: ReferenceSeries) {
        self.reference = Some(reference);
    }

    pub fn clear_command(&mut self) {
        self.command = None;
    }

    pub fn clear_reference(&mut self) {
        self.reference = None;
    }

    pub fn command(&self) -> Option<&CommandSeries> {
        self.command.as_ref()
    }

    pub fn reference(&self) -> Option<&ReferenceSeries> {
        self.reference.as_ref()
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Driver clock, advanced by `dt` per tick
    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn state(&self) -> PendulumState {
        self.model.state()
    }

    pub fn model(&self) -> &PendulumModel {
        &self.model
    }

    /// Mutable access for live parameter tuning between ticks
    pub fn model_mut(&mut self) -> &mut PendulumModel {
        &mut self.model
    }

    /// Advance by one `dt`
    pub fn tick(&mut self) -> StepReport {
        let dt = self.dt;

        let forcing = self
            .command
            .as_ref()
            .and_then(|command| command.impulse_at(self.current_time, dt));
        if let Some(kick) = forcing {
            self.model.apply_force(kick);
        }

        let mut state = self.model.step(dt);
        self.current_time += dt;

        let fell = match self.fall_boundary {
            Some(boundary) if state.theta.abs() > boundary => {
                state.theta = boundary.copysign(state.theta);
                state.theta_dot = 0.0;
                self.model.set_state(state);
                true
            }
            _ => false,
        };

        let validation = self.validation();
        trace!(
            "tick t={:.6} theta={:.6} theta_dot={:.6} forcing={:?} fell={} error={:.3e} matched={}",
            self.current_time,
            state.theta,
            state.theta_dot,
            forcing,
            fell,
            validation.error,
            validation.matched
        );

        StepReport {
            state,
            forcing,
            fell,
            validation,
        }
    }

    /// Compare the current state with the reference sample within `dt / 2` of
    /// the driver clock
    pub fn validation(&self) -> Validation {
        self.reference
            .as_ref()
            .and_then(|reference| reference.first_within(self.current_time, 0.5 * self.dt))
            .map(|sample| Validation::compare(&self.model.state(), &sample.value))
            .unwrap_or(Validation::UNMATCHED)
    }

    /// Validation error only; 0 when no reference sample matched
    pub fn validation_error(&self) -> f64 {
        self.validation().error
    }

    /// Tick `steps` times and summarise the validation errors
    pub fn run(&mut self, steps: usize) -> TraceSummary {
        let mut summary = TraceSummary::default();
        let mut sum_sq = 0.0;
        for _ in 0..steps {
            let report = self.tick();
            summary.steps += 1;
            if report.fell {
                summary.falls += 1;
            }
            let Validation { error, matched } = report.validation;
            if matched {
                summary.matched += 1;
                sum_sq += error * error;
                summary.max_error = summary.max_error.max(error);
            }
        }
        if summary.matched > 0 {
            summary.rms_error = (sum_sq / summary.matched as f64).sqrt();
        }
        debug!(
            "run finished: {} steps, {} matched, {} falls, rms={:.3e}, max={:.3e}",
            summary.steps, summary.matched, summary.falls, summary.rms_error, summary.max_error
        );
        summary
    }

    /// Return the model to its starting angle at rest and the clock to zero
    ///
    /// Attached series are kept.
    pub fn reset(&mut self) {
        self.model.reset_to(self.initial_angle);
        self.current_time = 0.0;
    }
}
