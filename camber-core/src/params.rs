use thiserror::Error;
use uom::{
    si::{
        ISQ, Quantity, SI,
        f64::{Force, Length, Mass, Time, Velocity},
        force::newton,
        length::meter,
        mass::kilogram,
        time::second,
        velocity::meter_per_second,
    },
    typenum::{N1, N2, P1, Z0},
};

/// Stiffness is a force per unit length (N/m or kg/s²).
pub type Stiffness = Quantity<ISQ<Z0, P1, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// A damping coefficient is a force per unit velocity (N·s/m or kg/s).
pub type DampingRate = Quantity<ISQ<Z0, P1, N1, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Gains of the hybrid skyhook/groundhook damper controller.
///
/// Each gain scales the magnitude of one velocity or acceleration signal
/// into an additive contribution to the damping command, so their units are
/// implied by the signal they multiply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerGains {
    /// Low-frequency skyhook gain, applied to the filtered body velocity
    /// when the classic skyhook switching condition holds.
    pub lf_skyhook: f64,

    /// High-frequency skyhook gain, always on, suppressing body jerk.
    pub hf_skyhook: f64,

    /// Groundhook gain, applied to the filtered wheel velocity to suppress
    /// wheel hop.
    pub groundhook: f64,

    /// Acceleration-feedback gain shaping the body force.
    pub acceleration: f64,
}

impl Default for ControllerGains {
    /// The tuned gain set for the default suspension parameters.
    fn default() -> Self {
        Self {
            lf_skyhook: 3600.0,
            hf_skyhook: 4000.0,
            groundhook: 250.0,
            acceleration: 120.0,
        }
    }
}

/// Immutable configuration of a quarter-car suspension and its controller.
///
/// A parameter set is fixed for the lifetime of a [`QuarterCar`] and never
/// changes during or across runs; it is `Copy`, so independent runs can
/// freely share it.
///
/// [`QuarterCar`]: crate::QuarterCar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuspensionParams {
    /// Sprung (body) mass.
    pub sprung_mass: Mass,

    /// Unsprung (wheel) mass.
    pub unsprung_mass: Mass,

    /// Suspension spring stiffness between body and wheel.
    pub suspension_stiffness: Stiffness,

    /// Tire stiffness between wheel and road.
    pub tire_stiffness: Stiffness,

    /// Minimum damping coefficient the semi-active damper can realize.
    pub damping_min: DampingRate,

    /// Maximum damping coefficient the semi-active damper can realize.
    pub damping_max: DampingRate,

    /// Duration of one simulation step.
    pub timestep: Time,

    /// Number of steps a damping command waits before taking effect.
    pub delay_steps: usize,

    /// Controller gain set.
    pub gains: ControllerGains,

    /// Smoothing factor of the body-velocity low-pass filter, in (0, 1).
    pub body_filter_smoothing: f64,

    /// Smoothing factor of the wheel-velocity low-pass filter, in (0, 1).
    pub wheel_filter_smoothing: f64,
}

impl SuspensionParams {
    /// Sets the sprung mass from a `uom::Mass`.
    #[must_use]
    pub fn sprung_mass(mut self, mass: Mass) -> Self {
        self.sprung_mass = mass;
        self
    }

    /// Sets the sprung mass in SI units (kg).
    #[must_use]
    pub fn sprung_mass_si(self, mass: f64) -> Self {
        self.sprung_mass(Mass::new::<kilogram>(mass))
    }

    /// Sets the unsprung mass from a `uom::Mass`.
    #[must_use]
    pub fn unsprung_mass(mut self, mass: Mass) -> Self {
        self.unsprung_mass = mass;
        self
    }

    /// Sets the unsprung mass in SI units (kg).
    #[must_use]
    pub fn unsprung_mass_si(self, mass: f64) -> Self {
        self.unsprung_mass(Mass::new::<kilogram>(mass))
    }

    /// Sets the suspension stiffness from a [`Stiffness`] quantity.
    #[must_use]
    pub fn suspension_stiffness(mut self, stiffness: Stiffness) -> Self {
        self.suspension_stiffness = stiffness;
        self
    }

    /// Sets the suspension stiffness in SI units (N/m).
    #[must_use]
    pub fn suspension_stiffness_si(self, stiffness: f64) -> Self {
        self.suspension_stiffness(stiffness_from_si(stiffness))
    }

    /// Sets the tire stiffness from a [`Stiffness`] quantity.
    #[must_use]
    pub fn tire_stiffness(mut self, stiffness: Stiffness) -> Self {
        self.tire_stiffness = stiffness;
        self
    }

    /// Sets the tire stiffness in SI units (N/m).
    #[must_use]
    pub fn tire_stiffness_si(self, stiffness: f64) -> Self {
        self.tire_stiffness(stiffness_from_si(stiffness))
    }

    /// Sets the realizable damping range from [`DampingRate`] quantities.
    #[must_use]
    pub fn damping_range(mut self, min: DampingRate, max: DampingRate) -> Self {
        self.damping_min = min;
        self.damping_max = max;
        self
    }

    /// Sets the realizable damping range in SI units (N·s/m).
    #[must_use]
    pub fn damping_range_si(self, min: f64, max: f64) -> Self {
        self.damping_range(damping_from_si(min), damping_from_si(max))
    }

    /// Sets the step duration from a `uom::Time`.
    #[must_use]
    pub fn timestep(mut self, timestep: Time) -> Self {
        self.timestep = timestep;
        self
    }

    /// Sets the step duration in SI units (s).
    #[must_use]
    pub fn timestep_si(self, timestep: f64) -> Self {
        self.timestep(Time::new::<second>(timestep))
    }

    /// Sets the actuator command delay, in steps.
    #[must_use]
    pub fn delay_steps(mut self, delay_steps: usize) -> Self {
        self.delay_steps = delay_steps;
        self
    }

    /// Sets the controller gain set.
    #[must_use]
    pub fn gains(mut self, gains: ControllerGains) -> Self {
        self.gains = gains;
        self
    }

    /// Sets the body and wheel velocity filter smoothing factors.
    #[must_use]
    pub fn filter_smoothing(mut self, body: f64, wheel: f64) -> Self {
        self.body_filter_smoothing = body;
        self.wheel_filter_smoothing = wheel;
        self
    }

    /// Checks that the configuration describes a physically meaningful,
    /// numerically usable system.
    ///
    /// # Errors
    ///
    /// Returns a [`ParamsError`] naming the first offending field if any
    /// mass, stiffness, or the timestep is not strictly positive, the
    /// damping range is empty or its floor non-positive, the delay line has
    /// zero capacity, a filter smoothing factor lies outside (0, 1), or a
    /// controller gain is negative.
    pub fn validate(&self) -> Result<(), ParamsError> {
        for mass in [self.sprung_mass.value, self.unsprung_mass.value] {
            if !(mass > 0.0) {
                return Err(ParamsError::NonPositiveMass(mass));
            }
        }
        for stiffness in [self.suspension_stiffness.value, self.tire_stiffness.value] {
            if !(stiffness > 0.0) {
                return Err(ParamsError::NonPositiveStiffness(stiffness));
            }
        }
        if !(self.timestep.value > 0.0) {
            return Err(ParamsError::NonPositiveTimestep(self.timestep.value));
        }

        let (min, max) = (self.damping_min.value, self.damping_max.value);
        if !(min > 0.0) {
            return Err(ParamsError::NonPositiveDamping(min));
        }
        if !(max > min) {
            return Err(ParamsError::EmptyDampingRange { min, max });
        }

        if self.delay_steps == 0 {
            return Err(ParamsError::ZeroDelay);
        }

        for smoothing in [self.body_filter_smoothing, self.wheel_filter_smoothing] {
            if !(smoothing > 0.0 && smoothing < 1.0) {
                return Err(ParamsError::SmoothingOutOfRange(smoothing));
            }
        }

        let ControllerGains {
            lf_skyhook,
            hf_skyhook,
            groundhook,
            acceleration,
        } = self.gains;
        for gain in [lf_skyhook, hf_skyhook, groundhook, acceleration] {
            if !(gain >= 0.0) {
                return Err(ParamsError::NegativeGain(gain));
            }
        }

        Ok(())
    }
}

impl Default for SuspensionParams {
    /// A passenger-car corner with the tuned default controller.
    fn default() -> Self {
        Self {
            sprung_mass: Mass::new::<kilogram>(290.0),
            unsprung_mass: Mass::new::<kilogram>(59.0),
            suspension_stiffness: stiffness_from_si(16_000.0),
            tire_stiffness: stiffness_from_si(190_000.0),
            damping_min: damping_from_si(800.0),
            damping_max: damping_from_si(3500.0),
            timestep: Time::new::<second>(0.005),
            delay_steps: 4,
            gains: ControllerGains::default(),
            body_filter_smoothing: 0.05,
            wheel_filter_smoothing: 0.15,
        }
    }
}

/// Error type returned when validating a [`SuspensionParams`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ParamsError {
    #[error("mass must be positive, got {0} kg")]
    NonPositiveMass(f64),

    #[error("stiffness must be positive, got {0} N/m")]
    NonPositiveStiffness(f64),

    #[error("timestep must be positive, got {0} s")]
    NonPositiveTimestep(f64),

    #[error("damping floor must be positive, got {0} N·s/m")]
    NonPositiveDamping(f64),

    #[error("damping range is empty: min {min} N·s/m is not below max {max} N·s/m")]
    EmptyDampingRange { min: f64, max: f64 },

    #[error("actuator delay line needs at least one step")]
    ZeroDelay,

    #[error("filter smoothing must be in (0, 1), got {0}")]
    SmoothingOutOfRange(f64),

    #[error("controller gain must be non-negative, got {0}")]
    NegativeGain(f64),
}

fn stiffness_from_si(value: f64) -> Stiffness {
    Force::new::<newton>(value) / Length::new::<meter>(1.0)
}

fn damping_from_si(value: f64) -> DampingRate {
    Force::new::<newton>(value) / Velocity::new::<meter_per_second>(1.0)
}
