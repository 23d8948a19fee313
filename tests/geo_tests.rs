use cinescope::db::Cinema;
use cinescope::geo::{haversine_distance_m, rank, Coordinate, RankedCinema};

/// Degrees of latitude per kilometer on the reference sphere
const DEG_PER_KM: f64 = 1.0 / 111.195;

fn cinema_at(uuid: &str, latitude: f64, longitude: f64) -> Cinema {
    Cinema {
        uuid: uuid.to_string(),
        name: format!("Cinema {}", uuid),
        url: "https://example.org".to_string(),
        location: Coordinate::new(latitude, longitude),
        films: Vec::new(),
    }
}

#[test]
fn test_distance_is_zero_for_equal_coordinates() {
    let here = Coordinate::new(55.7558, 37.6173);
    assert_eq!(haversine_distance_m(here, here), 0.0);
}

#[test]
fn test_distance_is_symmetric() {
    let a = Coordinate::new(55.7558, 37.6173);
    let b = Coordinate::new(59.9343, 30.3351);
    let ab = haversine_distance_m(a, b);
    let ba = haversine_distance_m(b, a);
    assert!((ab - ba).abs() < 1e-6);
}

#[test]
fn test_known_city_pair_distance() {
    // Moscow to Saint Petersburg, roughly 634 km great-circle
    let moscow = Coordinate::new(55.7558, 37.6173);
    let petersburg = Coordinate::new(59.9343, 30.3351);

    let distance = haversine_distance_m(moscow, petersburg);
    assert!(
        (620_000.0..650_000.0).contains(&distance),
        "unexpected distance: {distance}"
    );
}

#[test]
fn test_rank_orders_nearest_first() {
    let origin = Coordinate::new(55.75, 37.62);
    // Catalog order deliberately scrambled: 5 km, 1 km, 3 km away
    let cinemas = vec![
        cinema_at("far", 55.75 + 5.0 * DEG_PER_KM, 37.62),
        cinema_at("near", 55.75 + 1.0 * DEG_PER_KM, 37.62),
        cinema_at("mid", 55.75 + 3.0 * DEG_PER_KM, 37.62),
    ];

    let ranked = rank(origin, cinemas);
    let order: Vec<&str> = ranked.iter().map(|r| r.cinema.uuid.as_str()).collect();

    assert_eq!(order, vec!["near", "mid", "far"]);
}

#[test]
fn test_rank_distances_are_non_decreasing() {
    let origin = Coordinate::new(53.9, 27.56);
    let cinemas = vec![
        cinema_at("a", 53.95, 27.7),
        cinema_at("b", 53.86, 27.48),
        cinema_at("c", 53.9, 27.56),
        cinema_at("d", 54.1, 27.2),
    ];

    let ranked = rank(origin, cinemas);
    for pair in ranked.windows(2) {
        assert!(pair[0].distance_m <= pair[1].distance_m);
    }
}

#[test]
fn test_rank_is_stable_for_equal_distances() {
    let origin = Coordinate::new(55.75, 37.62);
    // Two cinemas at the same address keep their catalog order
    let cinemas = vec![
        cinema_at("first", 55.76, 37.62),
        cinema_at("second", 55.76, 37.62),
    ];

    let ranked = rank(origin, cinemas);
    let order: Vec<&str> = ranked.iter().map(|r| r.cinema.uuid.as_str()).collect();

    assert_eq!(order, vec!["first", "second"]);
}

#[test]
fn test_distance_km_truncates() {
    let entry = RankedCinema {
        cinema: cinema_at("x", 0.0, 0.0),
        distance_m: 4999.0,
    };
    assert_eq!(entry.distance_km(), 4);

    let entry = RankedCinema {
        cinema: cinema_at("y", 0.0, 0.0),
        distance_m: 999.0,
    };
    assert_eq!(entry.distance_km(), 0);
}
