use thiserror::Error;
use uom::si::f64::Time;

use crate::simulator::RideResponse;

/// Error type for ride-metric computation.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MetricsError {
    /// The response series held no samples.
    #[error("response series are empty")]
    EmptySeries,

    /// The displacement and acceleration series differ in length.
    #[error("series lengths differ: {displacement} displacement vs {acceleration} acceleration samples")]
    LengthMismatch {
        displacement: usize,
        acceleration: usize,
    },

    /// The timestep used for the jerk difference quotient was not positive.
    #[error("timestep must be positive, got {0} s")]
    NonPositiveTimestep(f64),
}

/// Forward-difference jerk of an acceleration series.
///
/// `jerk[i] = (acceleration[i + 1] - acceleration[i]) / dt`. The last
/// element has no forward difference and is padded with zero, so the
/// returned series always has the same length as its input.
#[must_use]
pub fn jerk_series(acceleration: &[f64], timestep: Time) -> Vec<f64> {
    let dt = timestep.value;
    let mut jerk = Vec::with_capacity(acceleration.len());
    for pair in acceleration.windows(2) {
        jerk.push((pair[1] - pair[0]) / dt);
    }
    if !acceleration.is_empty() {
        jerk.push(0.0);
    }
    jerk
}

/// Ride-comfort scores reduced from one simulated run.
///
/// Displacement is scored relative to the run's first sample, so a run that
/// settles back where it started scores the same regardless of its absolute
/// offset. The comfort score is the fixed weighted combination
/// `0.5 * rms_displacement + max_displacement + 0.5 * rms_jerk + max_jerk`;
/// lower is more comfortable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RideMetrics {
    /// RMS of the recentered body displacement, in meters.
    pub rms_displacement: f64,

    /// Largest absolute recentered body displacement, in meters.
    pub max_displacement: f64,

    /// RMS of the body jerk, in m/s³.
    pub rms_jerk: f64,

    /// Largest absolute body jerk, in m/s³.
    pub max_jerk: f64,

    /// Weighted combination of the four scores; lower is better.
    pub comfort_score: f64,
}

impl RideMetrics {
    /// Computes the metrics for a simulated [`RideResponse`].
    ///
    /// # Errors
    ///
    /// See [`from_series`](Self::from_series).
    pub fn from_response(response: &RideResponse, timestep: Time) -> Result<Self, MetricsError> {
        Self::from_series(
            &response.body_displacement,
            &response.body_acceleration,
            timestep,
        )
    }

    /// Computes the metrics from raw displacement and acceleration series.
    ///
    /// A pure function of its inputs: no randomness, no global state.
    ///
    /// # Errors
    ///
    /// Returns a [`MetricsError`] if the series differ in length, are
    /// empty, or the timestep is not positive.
    pub fn from_series(
        displacement: &[f64],
        acceleration: &[f64],
        timestep: Time,
    ) -> Result<Self, MetricsError> {
        if displacement.len() != acceleration.len() {
            return Err(MetricsError::LengthMismatch {
                displacement: displacement.len(),
                acceleration: acceleration.len(),
            });
        }
        if displacement.is_empty() {
            return Err(MetricsError::EmptySeries);
        }
        if !(timestep.value > 0.0) {
            return Err(MetricsError::NonPositiveTimestep(timestep.value));
        }

        let origin = displacement[0];
        let recentered: Vec<f64> = displacement.iter().map(|z| z - origin).collect();

        let rms_displacement = rms(&recentered);
        let max_displacement = max_abs(&recentered);

        let jerk = jerk_series(acceleration, timestep);
        let rms_jerk = rms(&jerk);
        let max_jerk = max_abs(&jerk);

        let comfort_score = 0.5 * rms_displacement + max_displacement + 0.5 * rms_jerk + max_jerk;

        Ok(Self {
            rms_displacement,
            max_displacement,
            rms_jerk,
            max_jerk,
            comfort_score,
        })
    }
}

fn rms(series: &[f64]) -> f64 {
    let mean_square = series.iter().map(|x| x * x).sum::<f64>() / series.len() as f64;
    mean_square.sqrt()
}

fn max_abs(series: &[f64]) -> f64 {
    series.iter().fold(0.0, |largest, &x| largest.max(x.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::time::second;

    fn dt() -> Time {
        Time::new::<second>(0.005)
    }

    #[test]
    fn jerk_is_the_forward_difference_with_a_padded_tail() {
        let acceleration = [0.0, 1.0, 2.0, 3.0];
        let jerk = jerk_series(&acceleration, dt());
        assert_eq!(jerk, vec![200.0, 200.0, 200.0, 0.0]);
    }

    #[test]
    fn jerk_series_matches_input_length() {
        for n in [1, 2, 7] {
            let acceleration = vec![1.0; n];
            assert_eq!(jerk_series(&acceleration, dt()).len(), n);
        }
        assert!(jerk_series(&[], dt()).is_empty());
    }

    #[test]
    fn ramp_acceleration_scores_by_hand() {
        // Jerk is [200, 200, 200, 0]: rms = sqrt(3 * 200^2 / 4), max = 200.
        let displacement = [0.0; 4];
        let acceleration = [0.0, 1.0, 2.0, 3.0];
        let metrics = RideMetrics::from_series(&displacement, &acceleration, dt()).unwrap();

        assert_relative_eq!(metrics.rms_displacement, 0.0);
        assert_relative_eq!(metrics.max_displacement, 0.0);
        assert_relative_eq!(metrics.rms_jerk, 30_000.0_f64.sqrt());
        assert_relative_eq!(metrics.max_jerk, 200.0);
        assert_relative_eq!(
            metrics.comfort_score,
            0.5 * 30_000.0_f64.sqrt() + 200.0
        );
    }

    #[test]
    fn displacement_is_recentered_on_the_first_sample() {
        let displacement = [5.0, 5.0, 5.0];
        let acceleration = [0.0, 0.0, 0.0];
        let metrics = RideMetrics::from_series(&displacement, &acceleration, dt()).unwrap();

        assert_eq!(metrics.rms_displacement, 0.0);
        assert_eq!(metrics.max_displacement, 0.0);
        assert_eq!(metrics.comfort_score, 0.0);
    }

    #[test]
    fn rejects_mismatched_series() {
        let result = RideMetrics::from_series(&[0.0, 1.0], &[0.0], dt());
        assert_eq!(
            result,
            Err(MetricsError::LengthMismatch {
                displacement: 2,
                acceleration: 1
            })
        );
    }

    #[test]
    fn rejects_empty_series() {
        assert_eq!(
            RideMetrics::from_series(&[], &[], dt()),
            Err(MetricsError::EmptySeries)
        );
    }

    #[test]
    fn rejects_non_positive_timestep() {
        let result = RideMetrics::from_series(&[0.0], &[0.0], Time::new::<second>(0.0));
        assert_eq!(result, Err(MetricsError::NonPositiveTimestep(0.0)));
    }

    #[test]
    fn single_sample_run_has_zero_jerk() {
        let metrics = RideMetrics::from_series(&[0.2], &[1.0], dt()).unwrap();
        assert_eq!(metrics.rms_jerk, 0.0);
        assert_eq!(metrics.max_jerk, 0.0);
    }
}
