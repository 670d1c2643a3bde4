//! Great-circle distance and Maidenhead locators.

use crate::types::Coordinate;

/// Mean earth radius used for summit distances, in km.
pub const EARTH_RADIUS_KM: f64 = 6373.0;

/// Haversine distance between `a` and `b` in kilometers.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.lon - a.lon).to_radians();

    // rounding can push antipodal pairs just past 1.0
    let h = ((dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2))
        .clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Six-character Maidenhead locator (field, square, subsquare) for `coord`.
///
/// Subsquare letters are lower-case. Points on the antimeridian or the north
/// pole fold into the last cell instead of overflowing the alphabet.
pub fn grid_locator(coord: Coordinate) -> String {
    let lon = (coord.lon + 180.0).clamp(0.0, 360.0);
    let lat = (coord.lat + 90.0).clamp(0.0, 180.0);

    let field_lon = cell(lon / 20.0, 18);
    let field_lat = cell(lat / 10.0, 18);
    let square_lon = cell((lon - f64::from(field_lon) * 20.0) / 2.0, 10);
    let square_lat = cell(lat - f64::from(field_lat) * 10.0, 10);
    let sub_lon = cell(
        (lon - f64::from(field_lon) * 20.0 - f64::from(square_lon) * 2.0) * 12.0,
        24,
    );
    let sub_lat = cell(
        (lat - f64::from(field_lat) * 10.0 - f64::from(square_lat)) * 24.0,
        24,
    );

    [
        char::from(b'A' + field_lon),
        char::from(b'A' + field_lat),
        char::from(b'0' + square_lon),
        char::from(b'0' + square_lat),
        char::from(b'a' + sub_lon),
        char::from(b'a' + sub_lat),
    ]
    .iter()
    .collect()
}

fn cell(value: f64, cells: u8) -> u8 {
    (value.floor().max(0.0) as u8).min(cells - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_locators() {
        assert_eq!(grid_locator(Coordinate::new(46.0, 7.0)), "JN36ma");
        assert_eq!(grid_locator(Coordinate::new(-34.91, -56.21)), "GF15vc");
        assert_eq!(grid_locator(Coordinate::new(90.0, 180.0)), "RR99xx");
        assert_eq!(grid_locator(Coordinate::new(-90.0, -180.0)), "AA00aa");
    }

    #[test]
    fn half_degree_of_latitude_on_equator() {
        let d = distance_km(Coordinate::new(0.0, 0.0), Coordinate::new(0.5, 0.0));
        assert!((d - 55.6).abs() < 0.556, "got {d}");
    }
}
