//! Great-circle distance computation and cinema ranking.

use serde::{Deserialize, Serialize};

use crate::db::Cinema;

/// Mean Earth radius in meters (IUGG)
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// A geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A cinema paired with its distance from the query origin
#[derive(Debug, Clone)]
pub struct RankedCinema {
    pub cinema: Cinema,
    pub distance_m: f64,
}

impl RankedCinema {
    /// Distance in whole kilometers, truncating division by 1000
    pub fn distance_km(&self) -> u64 {
        self.distance_m as u64 / 1000
    }
}

/// Haversine distance between two coordinates, in meters
pub fn haversine_distance_m(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Order cinemas by distance from `origin`, nearest first.
///
/// The sort is stable: cinemas at equal distance keep their catalog order.
pub fn rank(origin: Coordinate, cinemas: Vec<Cinema>) -> Vec<RankedCinema> {
    let mut ranked: Vec<RankedCinema> = cinemas
        .into_iter()
        .map(|cinema| {
            let distance_m = haversine_distance_m(origin, cinema.location);
            RankedCinema { cinema, distance_m }
        })
        .collect();

    ranked.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
    ranked
}
