//! Great-circle distance between two centroids.

/// Haversine distance in kilometres between two points given in decimal
/// degrees, on a sphere of `earth_radius_km`.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64, earth_radius_km: f64) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        lat1.to_radians(),
        lon1.to_radians(),
        lat2.to_radians(),
        lon2.to_radians(),
    );
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair past 1 for antipodal points.
    let c = 2.0 * a.sqrt().min(1.0).asin();
    earth_radius_km * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: f64 = 6367.0;

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(haversine_km(37.7749, -122.4194, 37.7749, -122.4194, R), 0.0);
        assert_eq!(haversine_km(-33.86, 151.2, -33.86, 151.2, R), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let points = [
            (37.7749, -122.4194),
            (34.0522, -118.2437),
            (41.8400, -87.8167),
            (-33.8688, 151.2093),
            (0.0, 179.9),
            (0.0, -179.9),
        ];
        for &(lat1, lon1) in &points {
            for &(lat2, lon2) in &points {
                let ab = haversine_km(lat1, lon1, lat2, lon2, R);
                let ba = haversine_km(lat2, lon2, lat1, lon1, R);
                assert!((ab - ba).abs() < 1e-9, "{ab} != {ba}");
            }
        }
    }

    #[test]
    fn san_francisco_to_los_angeles() {
        let km = haversine_km(37.7749, -122.4194, 34.0522, -118.2437, R);
        assert!((km - 559.0).abs() < 5.0, "got {km}");
    }

    #[test]
    fn crosses_the_antimeridian_short_way() {
        let km = haversine_km(0.0, 179.9, 0.0, -179.9, R);
        assert!(km < 25.0, "got {km}");
    }

    #[test]
    fn antipodes_are_half_the_circumference() {
        let km = haversine_km(0.0, 0.0, 0.0, 180.0, R);
        assert!((km - std::f64::consts::PI * R).abs() < 1e-6);
    }

    #[test]
    fn scales_with_radius() {
        let a = haversine_km(40.0, -100.0, 41.0, -101.0, 6367.0);
        let b = haversine_km(40.0, -100.0, 41.0, -101.0, 6371.0);
        assert!((b / a - 6371.0 / 6367.0).abs() < 1e-12);
    }
}
