//! Physical parameters and derived coefficients

use serde::{Deserialize, Serialize};

use crate::error::{PendulumError, Result};

/// Physical parameters of the pendulum
///
/// Mutable at runtime through [`PendulumModel::set_params`](super::PendulumModel::set_params),
/// which validates before accepting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PhysicsParameters {
    /// Bob mass (kg)
    pub mass: f64,
    /// Rod length (m)
    pub length: f64,
    /// Gravitational acceleration (m/s²)
    pub gravity: f64,
    /// Viscous damping coefficient (N·m·s/rad)
    pub damping: f64,
    /// Torsional spring constant (N·m/rad)
    pub spring_constant: f64,
    /// Additional moment of inertia about the pivot (kg·m²)
    pub moment_of_inertia: f64,
    /// Sinusoidal drive frequency (Hz)
    pub drive_frequency: f64,
    /// Sinusoidal drive amplitude (rad/s²)
    pub drive_amplitude: f64,
}

impl Default for PhysicsParameters {
    fn default() -> Self {
        Self {
            mass: 1.0,
            length: 1.0,
            gravity: 9.81,
            damping: 0.5,
            spring_constant: 0.0,
            moment_of_inertia: 1.0,
            drive_frequency: 0.0,
            drive_amplitude: 0.0,
        }
    }
}

impl PhysicsParameters {
    /// Tuning used for the balancing game: more damping and a small
    /// stabilising spring.
    pub fn inverted_default() -> Self {
        Self {
            damping: 0.4,
            spring_constant: 0.20,
            ..Self::default()
        }
    }

    /// Undamped, unsprung, undriven pendulum
    pub fn frictionless(mass: f64, length: f64, gravity: f64, moment_of_inertia: f64) -> Self {
        Self {
            mass,
            length,
            gravity,
            damping: 0.0,
            spring_constant: 0.0,
            moment_of_inertia,
            drive_frequency: 0.0,
            drive_amplitude: 0.0,
        }
    }

    /// `mass * length² + moment_of_inertia`, the divisor of every coefficient
    #[inline]
    pub fn effective_inertia(&self) -> f64 {
        self.mass * self.length * self.length + self.moment_of_inertia
    }

    /// Check every value is finite and physically meaningful
    ///
    /// Mass and length must be positive. Gravity, damping, spring constant
    /// and the drive terms may be zero but not negative. The moment of
    /// inertia is an offset on `mass * length²`, so only the resulting
    /// effective inertia has to be positive.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("mass", self.mass),
            ("length", self.length),
            ("gravity", self.gravity),
            ("damping", self.damping),
            ("springConstant", self.spring_constant),
            ("momentOfInertia", self.moment_of_inertia),
            ("driveFrequency", self.drive_frequency),
            ("driveAmplitude", self.drive_amplitude),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(PendulumError::NonFiniteParameter { name: *name });
        }

        for (name, value) in [("mass", self.mass), ("length", self.length)] {
            if value <= 0.0 {
                return Err(PendulumError::OutOfRange {
                    name,
                    value,
                    expected: "positive",
                });
            }
        }
        let non_negative = [
            ("gravity", self.gravity),
            ("damping", self.damping),
            ("springConstant", self.spring_constant),
            ("driveFrequency", self.drive_frequency),
            ("driveAmplitude", self.drive_amplitude),
        ];
        if let Some(&(name, value)) = non_negative.iter().find(|(_, v)| *v < 0.0) {
            return Err(PendulumError::OutOfRange {
                name,
                value,
                expected: "non-negative",
            });
        }

        let inertia = self.effective_inertia();
        if !(inertia.is_finite() && inertia > 0.0) {
            return Err(PendulumError::SingularInertia {
                mass: self.mass,
                length: self.length,
                moment_of_inertia: self.moment_of_inertia,
            });
        }
        Ok(())
    }

    /// Normalised coefficients for the current values
    pub fn coefficients(&self) -> Coefficients {
        let inertia = self.effective_inertia();
        Coefficients {
            ka: self.mass * self.length * self.gravity / inertia,
            ks: self.spring_constant / inertia,
            kb: self.damping / inertia,
        }
    }

    /// Drive term `A * sin(2π f t)`
    #[inline]
    pub fn drive(&self, t: f64) -> f64 {
        self.drive_amplitude * (2.0 * std::f64::consts::PI * self.drive_frequency * t).sin()
    }
}

/// Gravity, spring and damping coefficients normalised by effective inertia
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub ka: f64,
    pub ks: f64,
    pub kb: f64,
}

impl Coefficients {
    /// Small-angle natural frequency `sqrt(ka)` (rad/s)
    pub fn natural_frequency(&self) -> f64 {
        self.ka.sqrt()
    }

    /// Small-angle period `2π / sqrt(ka)` (s)
    pub fn small_angle_period(&self) -> f64 {
        2.0 * std::f64::consts::PI / self.natural_frequency()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_values() {
        let p = PhysicsParameters::default();
        assert_eq!(p.mass, 1.0);
        assert_eq!(p.length, 1.0);
        assert_eq!(p.gravity, 9.81);
        assert_eq!(p.damping, 0.5);
        assert_eq!(p.spring_constant, 0.0);
        assert_eq!(p.moment_of_inertia, 1.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_coefficients() {
        let p = PhysicsParameters {
            mass: 2.0,
            length: 1.5,
            gravity: 10.0,
            damping: 0.1,
            spring_constant: 0.5,
            moment_of_inertia: 0.5,
            ..PhysicsParameters::default()
        };
        // I = 2 * 2.25 + 0.5 = 5
        let c = p.coefficients();
        assert_relative_eq!(c.ka, 30.0 / 5.0, epsilon = 1e-12);
        assert_relative_eq!(c.ks, 0.1, epsilon = 1e-12);
        assert_relative_eq!(c.kb, 0.02, epsilon = 1e-12);
    }

    #[test]
    fn test_singular_inertia_rejected() {
        let p = PhysicsParameters {
            moment_of_inertia: -1.0,
            ..PhysicsParameters::default()
        };
        assert!(matches!(
            p.validate(),
            Err(PendulumError::SingularInertia { .. })
        ));

        let negative = PhysicsParameters {
            moment_of_inertia: -2.0,
            ..PhysicsParameters::default()
        };
        assert!(negative.validate().is_err());

        // A negative offset is fine while the total stays positive
        let offset = PhysicsParameters {
            moment_of_inertia: -0.5,
            ..PhysicsParameters::default()
        };
        assert!(offset.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let cases = [
            ("mass", PhysicsParameters { mass: 0.0, ..PhysicsParameters::default() }),
            ("length", PhysicsParameters { length: -1.0, ..PhysicsParameters::default() }),
            ("gravity", PhysicsParameters { gravity: -9.81, ..PhysicsParameters::default() }),
            ("damping", PhysicsParameters { damping: -5.0, ..PhysicsParameters::default() }),
            (
                "springConstant",
                PhysicsParameters { spring_constant: -0.1, ..PhysicsParameters::default() },
            ),
            (
                "driveAmplitude",
                PhysicsParameters { drive_amplitude: -1.0, ..PhysicsParameters::default() },
            ),
        ];
        for (field, p) in cases {
            match p.validate() {
                Err(PendulumError::OutOfRange { name, .. }) => assert_eq!(name, field),
                other => panic!("{}: unexpected {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_zero_gravity_and_friction_allowed() {
        let p = PhysicsParameters::frictionless(1.0, 1.0, 0.0, 0.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_non_finite_rejected() {
        let p = PhysicsParameters {
            damping: f64::NAN,
            ..PhysicsParameters::default()
        };
        match p.validate() {
            Err(PendulumError::NonFiniteParameter { name }) => assert_eq!(name, "damping"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_drive_term() {
        let p = PhysicsParameters {
            drive_amplitude: 2.0,
            drive_frequency: 0.25,
            ..PhysicsParameters::default()
        };
        // sin(2π * 0.25 * 1) = sin(π/2) = 1
        assert_relative_eq!(p.drive(1.0), 2.0, epsilon = 1e-12);
        assert_relative_eq!(p.drive(0.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_camel_case_serde() {
        let p: PhysicsParameters =
            serde_json::from_str(r#"{"springConstant": 0.3, "mass": 2.0}"#).unwrap();
        assert_eq!(p.spring_constant, 0.3);
        assert_eq!(p.mass, 2.0);
        assert_eq!(p.gravity, 9.81);
    }
}
