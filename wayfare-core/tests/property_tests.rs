//! Property-based tests for the core algorithms.
//!
//! # Invariants tested
//!
//! - **Polyline fidelity:** encoding then decoding loses at most `1e-5` degrees.
//! - **Distance symmetry:** `haversine_km(a, b) == haversine_km(b, a)`.
//! - **Fare monotonicity:** a longer ride never costs less.
//! - **Return trips:** the return price is exactly twice the single price.
//! - **Wraparound:** after `k` ticks a vehicle seeded at `s` sits at `(s + k) % len`.

use proptest::prelude::*;
use wayfare_core::test_support::ManualClock;
use wayfare_core::{
    AnimationDriver, Coordinate, FareCalculator, FleetConfig, RideCategory, Route, haversine_km,
    polyline,
};

fn coordinate() -> impl Strategy<Value = Coordinate> {
    (-90.0_f64..=90.0, -180.0_f64..=180.0).prop_map(|(lat, lng)| {
        Coordinate::new(lat, lng).expect("strategy stays inside the valid ranges")
    })
}

fn category() -> impl Strategy<Value = RideCategory> {
    prop::sample::select(RideCategory::ALL.to_vec())
}

fn route(len: usize) -> Route {
    (0..len)
        .map(|i| Coordinate::new(0.0, i as f64 * 1e-3).expect("valid coordinate"))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn polyline_round_trip_is_within_precision(
        points in prop::collection::vec(coordinate(), 0..32),
    ) {
        let encoded = polyline::encode(&points);
        let decoded = polyline::decode(&encoded).expect("encoder output decodes");
        prop_assert_eq!(decoded.len(), points.len());
        for (original, restored) in points.iter().zip(decoded.points()) {
            prop_assert!((original.latitude() - restored.latitude()).abs() <= 1e-5);
            prop_assert!((original.longitude() - restored.longitude()).abs() <= 1e-5);
        }
    }

    #[test]
    fn decoding_arbitrary_text_never_panics(input in ".{0,64}") {
        let _ = polyline::decode(&input);
    }

    #[test]
    fn distance_is_symmetric_and_non_negative(a in coordinate(), b in coordinate()) {
        let forward = haversine_km(a, b);
        prop_assert_eq!(forward, haversine_km(b, a));
        prop_assert!(forward >= 0.0);
        prop_assert!(forward <= std::f64::consts::PI * wayfare_core::EARTH_RADIUS_KM + 1e-9);
    }

    #[test]
    fn longer_rides_never_cost_less(
        category in category(),
        shorter in 0.0_f64..500.0,
        extra in 0.0_f64..500.0,
    ) {
        let calculator = FareCalculator::default();
        let near = calculator.price(category, shorter, false).expect("valid distance");
        let far = calculator.price(category, shorter + extra, false).expect("valid distance");
        prop_assert!(near <= far);
    }

    #[test]
    fn return_trips_cost_exactly_double(category in category(), distance in 0.0_f64..1_000.0) {
        let calculator = FareCalculator::default();
        let single = calculator.price(category, distance, false).expect("valid distance");
        let both = calculator.price(category, distance, true).expect("valid distance");
        prop_assert_eq!(both, single * 2);
    }

    #[test]
    fn vehicles_wrap_around_the_route(
        category in category(),
        len in 2_usize..64,
        ticks in 0_usize..200,
    ) {
        let mut driver = AnimationDriver::new(ManualClock::new(), FleetConfig::default())
            .expect("default fleet is valid");
        driver.show(route(len), category).expect("route is not empty");
        let seeded: Vec<_> = driver.vehicles().iter().map(|v| v.route_index).collect();
        driver.start().expect("route has at least two points");
        for _ in 0..ticks {
            prop_assert!(driver.tick());
        }
        let advanced: Vec<_> = driver.vehicles().iter().map(|v| v.route_index).collect();
        let expected: Vec<_> = seeded.iter().map(|start| (start + ticks) % len).collect();
        prop_assert_eq!(advanced, expected);
    }
}
