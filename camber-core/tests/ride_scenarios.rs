//! End-to-end checks of the simulation engine against its contract.

use camber_core::{QuarterCar, RideMetrics, SimulationError, SuspensionParams};

fn default_car() -> QuarterCar {
    QuarterCar::new(SuspensionParams::default()).unwrap()
}

/// A unit impulse at sample zero followed by silence.
fn impulse_road(len: usize) -> Vec<f64> {
    let mut road = vec![0.0; len];
    road[0] = 1.0;
    road
}

#[test]
fn rejects_an_empty_road() {
    let car = default_car();
    assert_eq!(car.simulate(&[]), Err(SimulationError::EmptyRoad));
    assert!(car.simulate_trace(&[]).is_err());
}

#[test]
fn output_lengths_match_the_road() {
    let car = default_car();
    for n in [1, 2, 5, 100] {
        let road = vec![0.001; n];
        let response = car.simulate(&road).unwrap();
        assert_eq!(response.body_displacement.len(), n);
        assert_eq!(response.body_acceleration.len(), n);

        let trace = car.simulate_trace(&road).unwrap();
        assert_eq!(trace.wheel_displacement.len(), n);
        assert_eq!(trace.commanded_damping.len(), n);
        assert_eq!(trace.applied_damping.len(), n);
    }
}

#[test]
fn a_flat_road_from_rest_stays_exactly_at_equilibrium() {
    let car = default_car();
    let response = car.simulate(&vec![0.0; 500]).unwrap();

    assert!(response.body_displacement.iter().all(|&z| z == 0.0));
    assert!(response.body_acceleration.iter().all(|&a| a == 0.0));
}

#[test]
fn identical_runs_produce_identical_output() {
    let car = default_car();
    let road: Vec<f64> = (0..400)
        .map(|i| 0.02 * (f64::from(i) * 0.12).sin())
        .collect();

    let first = car.simulate(&road).unwrap();
    let second = car.simulate(&road).unwrap();
    assert_eq!(first, second);

    // A second simulator with the same parameters agrees as well.
    let other = default_car();
    assert_eq!(other.simulate(&road).unwrap(), first);
}

#[test]
fn applied_damping_lags_commands_by_the_delay() {
    let car = default_car();
    let delay_steps = car.params().delay_steps;
    let floor = car.params().damping_min.value;

    let trace = car.simulate_trace(&impulse_road(200)).unwrap();

    for i in 0..delay_steps {
        assert_eq!(trace.applied_damping[i], floor);
    }
    for i in delay_steps..200 {
        assert_eq!(trace.applied_damping[i], trace.commanded_damping[i - delay_steps]);
    }
}

#[test]
fn commanded_damping_stays_within_the_range() {
    let car = default_car();
    let trace = car.simulate_trace(&impulse_road(500)).unwrap();
    let (min, max) = (
        car.params().damping_min.value,
        car.params().damping_max.value,
    );

    for &command in &trace.commanded_damping {
        assert!(command >= min && command <= max);
    }
}

#[test]
fn an_impulse_produces_a_decaying_transient() {
    let car = default_car();
    let response = car.simulate(&impulse_road(1000)).unwrap();

    assert!(response.body_displacement.iter().all(|z| z.is_finite()));

    let peak = response
        .body_displacement
        .iter()
        .fold(0.0_f64, |largest, &z| largest.max(z.abs()));
    let settled = response.body_displacement.last().unwrap().abs();

    assert!(peak > 0.0, "the impulse should move the body");
    assert!(
        settled < 0.05 * peak,
        "displacement should decay back toward rest: peak {peak}, settled {settled}"
    );
}

#[test]
fn impulse_comfort_score_is_finite_and_positive() {
    let car = default_car();
    let response = car.simulate(&impulse_road(1000)).unwrap();
    let metrics = RideMetrics::from_response(&response, car.params().timestep).unwrap();

    assert!(metrics.comfort_score.is_finite());
    assert!(metrics.comfort_score > 0.0);
}

#[test]
fn a_stiffer_damper_floor_changes_the_response() {
    let road = impulse_road(300);
    let soft = default_car();
    let firm = QuarterCar::new(
        SuspensionParams::default().damping_range_si(2000.0, 3500.0),
    )
    .unwrap();

    let soft_response = soft.simulate(&road).unwrap();
    let firm_response = firm.simulate(&road).unwrap();
    assert_ne!(soft_response, firm_response);
}
