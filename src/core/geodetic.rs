//! WGS84 conversions between ECEF positions and geodetic coordinates

use crate::types::{StateVector, TriageError, TriageResult};
use ndarray::{Array2, ArrayView2};

/// WGS84 semi-major axis (m)
pub const WGS84_A: f64 = 6378137.0;

/// WGS84 flattening
pub const WGS84_F: f64 = 1.0 / 298.257223563;

/// WGS84 semi-minor axis (m)
pub const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);

/// WGS84 first eccentricity squared, 1 - b²/a²
pub const WGS84_E2: f64 = 1.0 - (WGS84_B * WGS84_B) / (WGS84_A * WGS84_A);

/// Fixed number of latitude refinements
pub const ITERATIONS: usize = 5;

/// Distance from the polar axis below which the closed polar form is used (m)
pub const POLAR_AXIS_TOLERANCE_M: f64 = 1.0e-3;

/// Prime vertical radius of curvature at a geodetic latitude (radians)
pub fn prime_vertical_radius(lat_rad: f64) -> f64 {
    WGS84_A / (1.0 - WGS84_E2 * lat_rad.sin().powi(2)).sqrt()
}

/// Convert an ECEF position (m) to geodetic latitude (deg), longitude (deg)
/// and height above the ellipsoid (m).
///
/// Starts from the spherical guess `atan2(z, p(1 - e²))` and refines the
/// latitude exactly `ITERATIONS` times, with no convergence check. The height
/// returned is the one computed in the last pass.
///
/// Points within `POLAR_AXIS_TOLERANCE_M` of the polar axis make `N + h`
/// vanish, so they take the closed form instead: latitude is `atan2(z, 0)` and
/// height is measured from the pole (`|z| - b`), or `-a` at the origin.
pub fn ecef_to_geodetic(x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    let lon = y.atan2(x);
    let p = (x * x + y * y).sqrt();

    if p < POLAR_AXIS_TOLERANCE_M {
        let lat = z.atan2(0.0);
        let h = if z == 0.0 { -WGS84_A } else { z.abs() - WGS84_B };
        return (lat.to_degrees(), lon.to_degrees(), h);
    }

    let mut lat = z.atan2(p * (1.0 - WGS84_E2));
    let mut h = 0.0;

    for _ in 0..ITERATIONS {
        let n = prime_vertical_radius(lat);
        h = p / lat.cos() - n;
        lat = z.atan2(p * (1.0 - WGS84_E2 * n / (n + h)));
    }

    (lat.to_degrees(), lon.to_degrees(), h)
}

/// Convert geodetic latitude/longitude (deg) and height (m) to an ECEF position (m)
pub fn geodetic_to_ecef(lat_deg: f64, lon_deg: f64, height: f64) -> [f64; 3] {
    let lat = lat_deg.to_radians();
    let lon = lon_deg.to_radians();
    let n = prime_vertical_radius(lat);

    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();

    [
        (n + height) * cos_lat * cos_lon,
        (n + height) * cos_lat * sin_lon,
        (n * (1.0 - WGS84_E2) + height) * sin_lat,
    ]
}

/// Convert an N x 3 matrix of ECEF positions into an N x 3 matrix of
/// (latitude deg, longitude deg, height m) rows.
pub fn ecef_to_geodetic_batch(positions: ArrayView2<f64>) -> TriageResult<Array2<f64>> {
    let (rows, cols) = positions.dim();
    if cols != 3 {
        return Err(TriageError::InvalidFormat(format!(
            "expected N x 3 ECEF positions, got {}x{}",
            rows, cols
        )));
    }

    let mut output = Array2::<f64>::zeros((rows, 3));
    for (row, position) in positions.outer_iter().enumerate() {
        let (lat, lon, h) = ecef_to_geodetic(position[0], position[1], position[2]);
        output[[row, 0]] = lat;
        output[[row, 1]] = lon;
        output[[row, 2]] = h;
    }

    log::debug!("Converted {} ECEF positions to geodetic", rows);
    Ok(output)
}

/// Geolocate the sub-satellite point of the middle state vector of an orbit segment
pub fn mid_orbit_geolocation(state_vectors: &[StateVector]) -> Option<(f64, f64, f64)> {
    let mid = state_vectors.get(state_vectors.len() / 2)?;
    let [x, y, z] = mid.position;
    Some(ecef_to_geodetic(x, y, z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::arr2;

    #[test]
    fn test_equator_prime_meridian() {
        let (lat, lon, h) = ecef_to_geodetic(WGS84_A, 0.0, 0.0);
        assert_abs_diff_eq!(lat, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(lon, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(h, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_north_pole_surface() {
        let (lat, _lon, h) = ecef_to_geodetic(0.0, 0.0, WGS84_B);
        assert_abs_diff_eq!(lat, 90.0, epsilon = 1e-6);
        assert_abs_diff_eq!(h, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_south_pole_above_surface() {
        let (lat, _lon, h) = ecef_to_geodetic(0.0, 0.0, -(WGS84_B + 500_000.0));
        assert_abs_diff_eq!(lat, -90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(h, 500_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_longitude_is_atan2() {
        let (x, y) = (-2_694_045.0, -4_293_642.0);
        for z in [-6_000_000.0, 0.0, 1_000.0, 3_857_878.0] {
            let (_, lon, _) = ecef_to_geodetic(x, y, z);
            assert_eq!(lon, f64::atan2(y, x).to_degrees());
        }
    }

    #[test]
    fn test_derived_constants() {
        assert_abs_diff_eq!(WGS84_B, 6356752.314245, epsilon = 1e-6);
        assert_abs_diff_eq!(WGS84_E2, 0.00669437999014, epsilon = 1e-12);
    }

    #[test]
    fn test_batch_conversion() {
        let positions = arr2(&[[WGS84_A, 0.0, 0.0], [0.0, WGS84_A, 0.0]]);
        let geodetic = ecef_to_geodetic_batch(positions.view()).unwrap();

        assert_eq!(geodetic.dim(), (2, 3));
        assert_abs_diff_eq!(geodetic[[0, 1]], 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(geodetic[[1, 1]], 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(geodetic[[1, 2]], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_batch_rejects_wrong_shape() {
        let positions = arr2(&[[1.0, 2.0], [3.0, 4.0]]);
        assert!(matches!(
            ecef_to_geodetic_batch(positions.view()),
            Err(TriageError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_mid_orbit_uses_middle_vector() {
        let vectors: Vec<StateVector> = [(0.0, 10.0), (0.0, 20.0), (0.0, 30.0), (0.0, 40.0)]
            .iter()
            .map(|&(lat, lon)| StateVector {
                time: None,
                position: geodetic_to_ecef(lat, lon, 520_000.0),
                velocity: None,
            })
            .collect();

        // len 4 -> index 2
        let (lat, lon, h) = mid_orbit_geolocation(&vectors).unwrap();
        assert_abs_diff_eq!(lat, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(lon, 30.0, epsilon = 1e-6);
        assert_abs_diff_eq!(h, 520_000.0, epsilon = 1e-3);

        assert!(mid_orbit_geolocation(&[]).is_none());
    }
}
