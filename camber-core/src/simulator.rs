use thiserror::Error;

use crate::{
    controller::DamperController,
    delay::CommandDelayLine,
    params::{ParamsError, SuspensionParams},
};

/// Error type for a simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SimulationError {
    /// The road sequence held no samples.
    #[error("road sequence is empty")]
    EmptyRoad,

    /// A road sample was NaN or infinite.
    ///
    /// Only produced by [`validate_road`]; the simulator itself does not
    /// sanitize its input.
    #[error("road sample {index} is not finite")]
    NonFiniteSample { index: usize },
}

/// Body response histories of one simulated run.
///
/// Both sequences are index-aligned with the road input and equal to it in
/// length. Entry `i` records the state as it was when road sample `i` was
/// applied, before that step's integration.
#[derive(Debug, Clone, PartialEq)]
pub struct RideResponse {
    /// Sprung-mass displacement history, in meters.
    pub body_displacement: Vec<f64>,

    /// Sprung-mass acceleration history, in m/s².
    pub body_acceleration: Vec<f64>,
}

/// Full diagnostic histories of one simulated run.
///
/// Extends [`RideResponse`] with the wheel motion and both damping
/// histories, which is how the actuator delay can be observed: the command
/// computed at step `i` is the coefficient applied at step
/// `i + delay_steps`.
#[derive(Debug, Clone, PartialEq)]
pub struct RideTrace {
    /// Sprung-mass displacement history, in meters.
    pub body_displacement: Vec<f64>,

    /// Sprung-mass acceleration history, in m/s².
    pub body_acceleration: Vec<f64>,

    /// Unsprung-mass displacement history, in meters.
    pub wheel_displacement: Vec<f64>,

    /// Damping command computed by the controller at each step, in N·s/m.
    pub commanded_damping: Vec<f64>,

    /// Damping coefficient actually applied at each step, in N·s/m.
    pub applied_damping: Vec<f64>,
}

impl RideTrace {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            body_displacement: Vec::with_capacity(capacity),
            body_acceleration: Vec::with_capacity(capacity),
            wheel_displacement: Vec::with_capacity(capacity),
            commanded_damping: Vec::with_capacity(capacity),
            applied_damping: Vec::with_capacity(capacity),
        }
    }
}

/// Checks that every road sample is finite.
///
/// The simulator treats non-finite input as undefined numerical behavior
/// rather than sanitizing it; callers that cannot vouch for their data can
/// run this guard first.
///
/// # Errors
///
/// Returns [`SimulationError::NonFiniteSample`] with the index of the first
/// NaN or infinite sample.
pub fn validate_road(road: &[f64]) -> Result<(), SimulationError> {
    match road.iter().position(|sample| !sample.is_finite()) {
        Some(index) => Err(SimulationError::NonFiniteSample { index }),
        None => Ok(()),
    }
}

/// A two-degree-of-freedom quarter-car model under semi-active damping.
///
/// The model couples a sprung mass (body) to an unsprung mass (wheel)
/// through a spring and the controlled damper, and the wheel to the road
/// through the tire spring. Each run starts from rest, advances one road
/// sample per step, and is fully deterministic: identical input and
/// parameters produce identical output.
///
/// A `QuarterCar` holds only immutable configuration. All mutable state
/// lives inside a single run, so one instance can drive any number of
/// independent runs, including concurrently from multiple threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuarterCar {
    params: SuspensionParams,
}

impl QuarterCar {
    /// Creates a simulator from a validated parameter set.
    ///
    /// # Errors
    ///
    /// Returns a [`ParamsError`] if the configuration fails
    /// [`SuspensionParams::validate`], so an invalid system can never reach
    /// the integration loop.
    pub fn new(params: SuspensionParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// The parameter set this simulator was built with.
    #[must_use]
    pub fn params(&self) -> &SuspensionParams {
        &self.params
    }

    /// Simulates one run over a road elevation profile.
    ///
    /// Returns the body displacement and acceleration histories used for
    /// ride-metric computation. See [`simulate_trace`](Self::simulate_trace)
    /// for the diagnostics variant.
    ///
    /// The road samples are elevations in meters; they must be finite
    /// (check with [`validate_road`] if in doubt). With pathological gains
    /// the integration may diverge and the output may contain very large or
    /// non-finite values; that is a property of the configured system, not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::EmptyRoad`] if `road` holds no samples.
    pub fn simulate(&self, road: &[f64]) -> Result<RideResponse, SimulationError> {
        let trace = self.simulate_trace(road)?;
        Ok(RideResponse {
            body_displacement: trace.body_displacement,
            body_acceleration: trace.body_acceleration,
        })
    }

    /// Simulates one run, recording the full diagnostic trace.
    ///
    /// The per-step order is load-bearing and must not be rearranged:
    ///
    /// 1. The oldest delay-line command becomes the active damping
    ///    coefficient. It was computed `delay_steps` ago; the coefficient
    ///    computed later in this same step is never applied now.
    /// 2. Spring, damper, and tire forces give the body and wheel
    ///    accelerations.
    /// 3. The pre-integration displacement and the fresh acceleration are
    ///    recorded.
    /// 4. The controller reads the pre-integration velocities and the fresh
    ///    body acceleration, and its command is enqueued.
    /// 5. Velocities advance by the trapezoidal rule on the acceleration
    ///    pair; positions advance semi-implicitly with the updated
    ///    velocities.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::EmptyRoad`] if `road` holds no samples.
    pub fn simulate_trace(&self, road: &[f64]) -> Result<RideTrace, SimulationError> {
        if road.is_empty() {
            return Err(SimulationError::EmptyRoad);
        }

        let params = &self.params;
        let sprung_mass = params.sprung_mass.value;
        let unsprung_mass = params.unsprung_mass.value;
        let suspension_stiffness = params.suspension_stiffness.value;
        let tire_stiffness = params.tire_stiffness.value;
        let damping_min = params.damping_min.value;
        let dt = params.timestep.value;

        let mut controller = DamperController::new(params);
        let mut delay = CommandDelayLine::new(params.delay_steps, damping_min);

        // Each run starts at rest.
        let (mut body_disp, mut body_vel) = (0.0_f64, 0.0_f64);
        let (mut wheel_disp, mut wheel_vel) = (0.0_f64, 0.0_f64);
        let (mut prev_body_acc, mut prev_wheel_acc) = (0.0_f64, 0.0_f64);

        let mut trace = RideTrace::with_capacity(road.len());

        for &elevation in road {
            // The damping applied now was commanded `delay_steps` ago.
            let active_damping = delay.oldest();

            let spring_force = suspension_stiffness * (body_disp - wheel_disp);
            let damper_force = active_damping * (body_vel - wheel_vel);
            let tire_force = tire_stiffness * (wheel_disp - elevation);

            let body_acc = -(spring_force + damper_force) / sprung_mass;
            let wheel_acc = (spring_force + damper_force - tire_force) / unsprung_mass;

            // Histories record the state before this step's integration.
            trace.body_displacement.push(body_disp);
            trace.body_acceleration.push(body_acc);
            trace.wheel_displacement.push(wheel_disp);
            trace.applied_damping.push(active_damping);

            // The controller also sees the pre-integration state; its
            // command takes effect `delay_steps` from now.
            let command = controller.command(body_vel, wheel_vel, body_acc);
            trace.commanded_damping.push(command);
            delay.push(command);

            // Trapezoidal velocity update, then semi-implicit positions.
            body_vel += 0.5 * (body_acc + prev_body_acc) * dt;
            wheel_vel += 0.5 * (wheel_acc + prev_wheel_acc) * dt;
            body_disp += body_vel * dt;
            wheel_disp += wheel_vel * dt;

            prev_body_acc = body_acc;
            prev_wheel_acc = wheel_acc;
        }

        Ok(trace)
    }
}
