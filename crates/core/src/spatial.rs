//! Spatial prefix resolution.
//!
//! Archival storage buckets the globe into 10°x10° cells. Each granule is
//! filed under a directory named for the cell containing its centerpoint,
//! e.g. `N70W120`.

/// Returns the archive directory prefix for a granule centerpoint.
///
/// Hemisphere letters come from the coordinate signs, bins from truncating
/// the absolute coordinate toward zero to a 10° boundary. A centerpoint
/// exactly at a pole lands in the 80 bin, and one at or past the
/// antimeridian in the 170 bin, so no singleton edge bins exist.
///
/// Pure and total for lat in [-90, 90] and lon in [-180, 180]. The result
/// is an object-store key, so segments join with `/` on every platform.
pub fn point_to_prefix(base_dir: &str, lat: f64, lon: f64) -> String {
    let ns = if lat >= 0.0 { 'N' } else { 'S' };
    let ew = if lon >= 0.0 { 'E' } else { 'W' };

    let mut lat_bin = 10 * (lat.abs() / 10.0).trunc() as i32;
    if lat_bin == 90 {
        lat_bin = 80;
    }

    let mut lon_bin = 10 * (lon.abs() / 10.0).trunc() as i32;
    if lon_bin >= 180 {
        lon_bin = 170;
    }

    if base_dir.is_empty() {
        format!("{}{:02}{}{:03}", ns, lat_bin, ew, lon_bin)
    } else {
        format!("{}/{}{:02}{}{:03}", base_dir, ns, lat_bin, ew, lon_bin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex_lite::Regex;

    #[test]
    fn test_example_centerpoint() {
        assert_eq!(point_to_prefix("base", 78.3, -123.7), "base/N70W120");
    }

    #[test]
    fn test_hemisphere_letters() {
        assert_eq!(point_to_prefix("b", 10.0, 10.0), "b/N10E010");
        assert_eq!(point_to_prefix("b", -10.0, 10.0), "b/S10E010");
        assert_eq!(point_to_prefix("b", 10.0, -10.0), "b/N10W010");
        assert_eq!(point_to_prefix("b", -10.0, -10.0), "b/S10W010");
    }

    #[test]
    fn test_zero_is_northeast() {
        assert_eq!(point_to_prefix("b", 0.0, 0.0), "b/N00E000");
    }

    #[test]
    fn test_pole_remaps_to_80_bin() {
        assert_eq!(point_to_prefix("b", 90.0, 0.0), "b/N80E000");
        assert_eq!(point_to_prefix("b", -90.0, 0.0), "b/S80E000");
    }

    #[test]
    fn test_antimeridian_clamps_to_170_bin() {
        assert_eq!(point_to_prefix("b", 0.0, 180.0), "b/N00E170");
        assert_eq!(point_to_prefix("b", 0.0, -180.0), "b/N00W170");
    }

    #[test]
    fn test_truncates_toward_zero() {
        // 89.999 is still the 80 bin, not rounded up to 90
        assert_eq!(point_to_prefix("b", 89.999, 0.0), "b/N80E000");
        assert_eq!(point_to_prefix("b", -0.5, -0.5), "b/S00W000");
    }

    #[test]
    fn test_empty_base_dir_has_no_leading_slash() {
        assert_eq!(point_to_prefix("", 78.3, -123.7), "N70W120");
    }

    #[test]
    fn test_pattern_over_full_domain() {
        let pattern = Regex::new(r"^b/[NS]\d{2}[EW]\d{3}$").unwrap();
        let mut lat = -90.0f64;
        while lat <= 90.0 {
            let mut lon = -180.0f64;
            while lon <= 180.0 {
                let prefix = point_to_prefix("b", lat, lon);
                assert!(pattern.is_match(&prefix), "bad prefix {} for ({}, {})", prefix, lat, lon);
                // Pure: same inputs, same output
                assert_eq!(prefix, point_to_prefix("b", lat, lon));
                lon += 2.5;
            }
            lat += 2.5;
        }
    }
}
