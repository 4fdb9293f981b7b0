//! Quarter-car ride-comfort simulation.
//!
//! Camber simulates a two-mass quarter-car suspension driven by a recorded
//! road elevation profile, under closed-loop control of a semi-active damper,
//! and reduces the resulting motion to ride-comfort scores.
//!
//! The crate is organized as small leaf components feeding one central
//! simulator:
//!
//! - [`soft_clip`]: smooth output saturation for the damping command.
//! - [`LowPassFilter`]: single-pole IIR filter separating slow body motion
//!   from high-frequency content.
//! - [`CommandDelayLine`]: fixed-length ring buffer modeling actuator
//!   response latency.
//! - [`DamperController`]: frequency-selective hybrid skyhook/groundhook
//!   control policy.
//! - [`QuarterCar`]: the per-timestep simulation engine.
//! - [`RideMetrics`]: comfort scores reduced from one simulated run.

mod controller;
mod delay;
mod metrics;
mod params;
mod saturate;
mod signal;
mod simulator;

pub use controller::DamperController;
pub use delay::CommandDelayLine;
pub use metrics::{MetricsError, RideMetrics, jerk_series};
pub use params::{ControllerGains, DampingRate, ParamsError, Stiffness, SuspensionParams};
pub use saturate::soft_clip;
pub use signal::LowPassFilter;
pub use simulator::{QuarterCar, RideResponse, RideTrace, SimulationError, validate_road};
