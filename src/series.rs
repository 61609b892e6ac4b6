//! Time-stamped sample sequences
//!
//! Command forcing and reference trajectories arrive as pre-loaded,
//! time-ordered samples. Decoding them from files happens elsewhere; rows that
//! failed to parse are simply absent.

use serde::{Deserialize, Serialize};

use crate::error::{PendulumError, Result};

/// One `(time, value)` row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample<T> {
    pub time: f64,
    pub value: T,
}

impl<T> Sample<T> {
    pub fn new(time: f64, value: T) -> Self {
        Self { time, value }
    }
}

/// Ground-truth position and velocity at one instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferencePoint {
    pub position: f64,
    pub velocity: f64,
}

impl ReferencePoint {
    pub fn new(position: f64, velocity: f64) -> Self {
        Self { position, velocity }
    }
}

/// Read-only source of samples ordered by ascending time
pub trait TimeSeriesSource<T> {
    /// All samples, ascending by time
    fn samples(&self) -> &[Sample<T>];

    /// First sample with `|sample.time - time| < tolerance`
    ///
    /// The boundary is exclusive: a sample exactly `tolerance` away does not
    /// match.
    fn first_within(&self, time: f64, tolerance: f64) -> Option<&Sample<T>> {
        let samples = self.samples();
        // Every sample before this index is at least `tolerance` too early
        let idx = samples.partition_point(|s| s.time - time <= -tolerance);
        samples
            .get(idx)
            .filter(|s| (s.time - time).abs() < tolerance)
    }

    /// Whether any sample lies within `tolerance` of `time`
    fn covers(&self, time: f64, tolerance: f64) -> bool {
        self.first_within(time, tolerance).is_some()
    }
}

/// In-memory time series
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries<T> {
    samples: Vec<Sample<T>>,
}

impl<T> Default for TimeSeries<T> {
    fn default() -> Self {
        Self {
            samples: Vec::new(),
        }
    }
}

impl<T> TimeSeries<T> {
    /// Build from samples sorted by time
    ///
    /// Timestamps must be finite and non-decreasing. Repeated timestamps are
    /// kept; lookups return the earliest of them.
    pub fn new(samples: Vec<Sample<T>>) -> Result<Self> {
        for (index, sample) in samples.iter().enumerate() {
            if !sample.time.is_finite() {
                return Err(PendulumError::UnorderedSeries { index });
            }
            if index > 0 && sample.time < samples[index - 1].time {
                return Err(PendulumError::UnorderedSeries { index });
            }
        }
        Ok(Self { samples })
    }

    /// Build from `(time, value)` pairs sorted by time
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (f64, T)>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(time, value)| Sample::new(time, value))
                .collect(),
        )
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample<T>> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Times of the first and last samples
    pub fn time_span(&self) -> Option<(f64, f64)> {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => Some((first.time, last.time)),
            _ => None,
        }
    }
}

impl<T> TimeSeriesSource<T> for TimeSeries<T> {
    fn samples(&self) -> &[Sample<T>] {
        &self.samples
    }
}

impl<'a, T> IntoIterator for &'a TimeSeries<T> {
    type Item = &'a Sample<T>;
    type IntoIter = std::slice::Iter<'a, Sample<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Reference trajectory rows
pub type ReferenceSeries = TimeSeries<ReferencePoint>;

/// Scalar command series and the gain it is loaded with
///
/// A matched command `u` kicks the angular velocity by `u * kj / dt`. With the
/// default gain of zero the series has no effect.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandSeries {
    pub series: TimeSeries<f64>,
    pub kj: f64,
}

impl CommandSeries {
    pub fn new(series: TimeSeries<f64>, kj: f64) -> Self {
        Self { series, kj }
    }

    /// Velocity kick for a step of size `dt` at `time`, if a command matches
    /// within `dt / 2`
    pub fn impulse_at(&self, time: f64, dt: f64) -> Option<f64> {
        self.series
            .first_within(time, 0.5 * dt)
            .map(|sample| sample.value * self.kj / dt)
    }
}
