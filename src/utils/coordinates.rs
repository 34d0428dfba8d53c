use crate::models::split_key;
use crate::utils::constants::GRID_RESOLUTION_DEG;

/// Snap a coordinate to the centre of the half-degree cell that contains it
///
/// # Examples
/// ```
/// use koppen_grid::utils::snap_to_cell_center;
///
/// assert_eq!(snap_to_cell_center(40.1), 40.25);
/// assert_eq!(snap_to_cell_center(-74.1), -74.25);
/// ```
pub fn snap_to_cell_center(value: f64) -> f64 {
    (value / GRID_RESOLUTION_DEG).floor() * GRID_RESOLUTION_DEG + GRID_RESOLUTION_DEG / 2.0
}

/// Format a coordinate with a fixed number of decimals, as grid keys are written
pub fn format_coordinate(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, value)
}

/// Parse a coordinate key (either separator) into finite `(latitude, longitude)`
pub fn parse_key_coordinates(key: &str) -> Option<(f64, f64)> {
    let (lat, lon) = split_key(key)?;
    let lat: f64 = lat.trim().parse().ok()?;
    let lon: f64 = lon.trim().parse().ok()?;
    (lat.is_finite() && lon.is_finite()).then_some((lat, lon))
}

/// Planar distance in degrees between two grid points
pub fn degree_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    ((lat2 - lat1).powi(2) + (lon2 - lon1).powi(2)).sqrt()
}
