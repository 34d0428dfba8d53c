use crate::error::Result;
use crate::models::{GridMapping, KeySeparator, LookupQuery, LookupResult, MatchKind};
use crate::utils::constants::{DEFAULT_KEY_PRECISION, DEFAULT_SEARCH_RADIUS_DEG};
use crate::utils::coordinates::{
    degree_distance, format_coordinate, parse_key_coordinates, snap_to_cell_center,
};
use tracing::debug;

/// Resolves coordinates to climate codes against a loaded grid mapping
pub struct ClimateLookup<'a> {
    mapping: &'a GridMapping,
    separator: KeySeparator,
    precision: usize,
    search_radius: f64,
}

impl<'a> ClimateLookup<'a> {
    pub fn new(mapping: &'a GridMapping) -> Self {
        Self {
            mapping,
            separator: mapping.detect_separator(),
            precision: DEFAULT_KEY_PRECISION,
            search_radius: DEFAULT_SEARCH_RADIUS_DEG,
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_search_radius(mut self, search_radius: f64) -> Self {
        self.search_radius = search_radius;
        self
    }

    /// Key of the cell containing `query`, formatted the way grid keys are written
    pub fn snapped_key(&self, query: &LookupQuery) -> String {
        let lat = format_coordinate(snap_to_cell_center(query.latitude), self.precision);
        let lon = format_coordinate(snap_to_cell_center(query.longitude), self.precision);
        format!("{}{}{}", lat, self.separator.as_char(), lon)
    }

    /// Look up the code for `query`.
    ///
    /// Tries the snapped cell first, then the nearest parseable cell within the
    /// search radius. `Ok(None)` means no cell is close enough.
    pub fn lookup(&self, query: &LookupQuery) -> Result<Option<LookupResult>> {
        query.check()?;

        let snapped_key = self.snapped_key(query);
        if let Some(code) = self.mapping.get(&snapped_key) {
            return Ok(Some(LookupResult {
                matched_key: snapped_key.clone(),
                snapped_key,
                code: code.to_string(),
                match_kind: MatchKind::Exact,
            }));
        }

        debug!(key = %snapped_key, "No exact grid match, searching nearby cells");

        let lat = snap_to_cell_center(query.latitude);
        let lon = snap_to_cell_center(query.longitude);
        let mut nearest: Option<(f64, &str, &str)> = None;

        for (key, code) in self.mapping.iter() {
            let Some((cell_lat, cell_lon)) = parse_key_coordinates(key) else {
                continue;
            };
            if (cell_lat - lat).abs() > self.search_radius
                || (cell_lon - lon).abs() > self.search_radius
            {
                continue;
            }

            let distance = degree_distance(lat, lon, cell_lat, cell_lon);
            if nearest.map_or(true, |(best, _, _)| distance < best) {
                nearest = Some((distance, key, code));
            }
        }

        Ok(nearest.map(|(distance, key, code)| LookupResult {
            snapped_key,
            matched_key: key.to_string(),
            code: code.to_string(),
            match_kind: MatchKind::Nearest { distance },
        }))
    }
}
