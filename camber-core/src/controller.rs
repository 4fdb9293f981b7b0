use crate::{
    params::{ControllerGains, SuspensionParams},
    saturate::soft_clip,
    signal::LowPassFilter,
};

/// A frequency-selective hybrid skyhook/groundhook damper controller.
///
/// The controller splits the body velocity into low- and high-frequency
/// bands with a single-pole filter and builds the damping command from four
/// additive terms on top of the damping floor:
///
/// - a **low-frequency skyhook** term, active only while the filtered body
///   velocity and the body–wheel relative velocity share a sign (the
///   classic skyhook switching condition),
/// - an always-on **high-frequency skyhook** term suppressing body jerk,
/// - a **groundhook** term on the filtered wheel velocity suppressing wheel
///   hop,
/// - an **acceleration feedback** term shaping the body force.
///
/// The sum is soft-clipped into the realizable damping range. The returned
/// command is what the simulator enqueues into its delay line; it takes
/// effect `delay_steps` later, never on the step it was computed.
#[derive(Debug, Clone, PartialEq)]
pub struct DamperController {
    gains: ControllerGains,
    damping_min: f64,
    damping_max: f64,
    body_filter: LowPassFilter,
    wheel_filter: LowPassFilter,
}

impl DamperController {
    /// Creates a controller for the given suspension, with zeroed filters.
    #[must_use]
    pub fn new(params: &SuspensionParams) -> Self {
        Self {
            gains: params.gains,
            damping_min: params.damping_min.value,
            damping_max: params.damping_max.value,
            body_filter: LowPassFilter::new(params.body_filter_smoothing),
            wheel_filter: LowPassFilter::new(params.wheel_filter_smoothing),
        }
    }

    /// Computes the next damping command from the pre-integration state.
    ///
    /// The filters are advanced with the velocities as they were before the
    /// current step's integration; the one-step lag this introduces is part
    /// of the control law, not an artifact.
    pub fn command(
        &mut self,
        body_velocity: f64,
        wheel_velocity: f64,
        body_acceleration: f64,
    ) -> f64 {
        let body_lf = self.body_filter.update(body_velocity);
        let wheel_lf = self.wheel_filter.update(wheel_velocity);
        let body_hf = body_velocity - body_lf;
        let relative_velocity = body_velocity - wheel_velocity;

        let mut target = self.damping_min;

        // Skyhook engages only while body and relative velocity agree.
        if body_lf * relative_velocity > 0.0 {
            target += self.gains.lf_skyhook * body_lf.abs();
        }
        target += self.gains.hf_skyhook * body_hf.abs();
        target += self.gains.groundhook * wheel_lf.abs();
        target += self.gains.acceleration * body_acceleration.abs();

        soft_clip(target, self.damping_min, self.damping_max)
    }
}
