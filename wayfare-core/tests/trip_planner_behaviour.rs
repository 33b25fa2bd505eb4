//! Behavioural tests for [`TripPlanner`].
//!
//! Route responses come from in-memory providers so scenarios control
//! ordering and failures without a network.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use wayfare_core::test_support::{FixedDirections, ManualClock};
use wayfare_core::{
    AnimationDriver, Booking, Completion, Coordinate, Directions, FareCalculator, FleetConfig,
    MapsError, PlannerError, RideCategory, Route, RouteRequest, TripPlanner, polyline,
};

const SAMPLE_POLYLINE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

type Planner = TripPlanner<ManualClock>;

struct TripWorld {
    planner: RefCell<Planner>,
    requests: RefCell<Vec<RouteRequest>>,
    outcome: RefCell<Option<Result<Completion, PlannerError>>>,
    booking: RefCell<Option<Booking>>,
}

#[fixture]
fn world() -> TripWorld {
    let driver =
        AnimationDriver::new(ManualClock::new(), FleetConfig::default()).expect("default fleet");
    TripWorld {
        planner: RefCell::new(TripPlanner::new(FareCalculator::default(), driver)),
        requests: RefCell::new(Vec::new()),
        outcome: RefCell::new(None),
        booking: RefCell::new(None),
    }
}

fn straight_route(points: usize) -> Route {
    (0..points)
        .map(|i| Coordinate::new(27.7, 85.3 + i as f64 * 1e-3).expect("valid coordinate"))
        .collect()
}

#[given("a rider travelling from {pickup} to {dropoff}")]
fn given_rider(world: &TripWorld, pickup: Coordinate, dropoff: Coordinate) {
    let mut planner = world.planner.borrow_mut();
    planner.set_pickup(pickup);
    planner.set_dropoff(dropoff);
}

#[given("the {category} category is selected")]
fn given_category(world: &TripWorld, category: RideCategory) {
    let selected = world.planner.borrow_mut().select_category(category);
    assert_eq!(selected, Some(category));
}

#[given("the rider wants a return trip")]
fn given_return_trip(world: &TripWorld) {
    world.planner.borrow_mut().set_return_trip(true);
}

#[when("the maps service returns the sample route")]
fn when_sample_route(world: &TripWorld) {
    let route = polyline::decode(SAMPLE_POLYLINE).expect("sample polyline decodes");
    let provider = FixedDirections::with_route(route);
    let outcome = world.planner.borrow_mut().request_route(&provider);
    world.outcome.replace(Some(outcome));
}

#[when("the maps service denies the request")]
fn when_denied(world: &TripWorld) {
    let provider = FixedDirections::with_error(MapsError::ApiConfiguration {
        message: "The provided API key is invalid.".to_string(),
    });
    let outcome = world.planner.borrow_mut().request_route(&provider);
    world.outcome.replace(Some(outcome));
}

#[when("two route requests are started")]
fn when_two_requests(world: &TripWorld) {
    let mut planner = world.planner.borrow_mut();
    let mut requests = world.requests.borrow_mut();
    for _ in 0..2 {
        requests.push(planner.begin_route_request().expect("both endpoints set"));
    }
}

fn resolve(world: &TripWorld, which: usize, points: usize) {
    let request = world.requests.borrow()[which];
    let outcome = world
        .planner
        .borrow_mut()
        .finish_route_request(request, Ok(Directions::from_route(straight_route(points))));
    world.outcome.replace(Some(outcome));
}

#[when("the newer request resolves with {points} points")]
fn when_newer_resolves(world: &TripWorld, points: usize) {
    resolve(world, 1, points);
}

#[when("the older request resolves with {points} points")]
fn when_older_resolves(world: &TripWorld, points: usize) {
    resolve(world, 0, points);
}

#[when("the ride is booked")]
fn when_booked(world: &TripWorld) {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let booking = world.planner.borrow().book(&mut rng).expect("ride is priced");
    world.booking.replace(Some(booking));
}

#[then("the quoted price is {price}")]
fn then_price(world: &TripWorld, price: u64) {
    let estimate = world.planner.borrow().fare_estimate().expect("estimate");
    assert_eq!(estimate.price, price);
}

#[then("{count} vehicles are animated along the route")]
fn then_vehicles(world: &TripWorld, count: usize) {
    let planner = world.planner.borrow();
    let route = planner.route().expect("route shown");
    assert_eq!(planner.vehicles().len(), count);
    for vehicle in planner.vehicles() {
        assert_eq!(route.get(vehicle.route_index), Some(vehicle.position));
    }
}

#[then("a configuration error is reported")]
fn then_configuration_error(world: &TripWorld) {
    let outcome = world.outcome.borrow();
    match &*outcome {
        Some(Err(PlannerError::Maps(err))) => {
            assert!(err.is_configuration_error());
            assert!(err.user_message().contains("API key"));
        }
        other => panic!("expected a configuration error, got {other:?}"),
    }
}

#[then("no route is shown")]
fn then_no_route(world: &TripWorld) {
    let planner = world.planner.borrow();
    assert!(planner.route().is_none());
    assert!(planner.vehicles().is_empty());
}

#[then("the shown route has {points} points")]
fn then_route_len(world: &TripWorld, points: usize) {
    let outcome = world.outcome.borrow();
    assert!(
        matches!(&*outcome, Some(Ok(Completion::Stale { .. }))),
        "the last response should be stale, got {outcome:?}"
    );
    let planner = world.planner.borrow();
    assert_eq!(planner.route().map(|route| route.len()), Some(points));
}

#[then("the confirmation code has four digits")]
fn then_code(world: &TripWorld) {
    let booking = world.booking.borrow();
    let booking = booking.as_ref().expect("booking made");
    assert_eq!(booking.code.to_string().len(), 4);
    assert_eq!(booking.fare.category, RideCategory::Bike);
}

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/trip_planner.feature", name = $title)]
        fn $fn_name(world: TripWorld) {
            let _ = world;
        }
    };
}

register_scenario!(
    quoting_a_taxi_ride,
    "quoting a taxi ride along a fetched route"
);
register_scenario!(doubling_for_return_trips, "doubling the quote for a return trip");
register_scenario!(
    reporting_denied_requests,
    "reporting a denied directions request"
);
register_scenario!(
    keeping_the_newest_route,
    "keeping the newest route when responses arrive out of order"
);
register_scenario!(booking_a_quoted_ride, "booking a quoted ride");
