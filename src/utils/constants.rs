/// Key separators
pub const COMMA_SEPARATOR: char = ',';
pub const SPACE_SEPARATOR: char = ' ';

/// Number of whitespace-separated fields in a grid table line (lat, lon, code)
pub const GRID_RECORD_FIELDS: usize = 3;

/// File names
pub const DEFAULT_GRID_FILE: &str = "koppen_grid_0.5deg.json";
pub const GRID_FILE_EXTENSION: &str = "json";

/// Grid geometry
pub const GRID_RESOLUTION_DEG: f64 = 0.5;

/// Lookup defaults
pub const DEFAULT_KEY_PRECISION: usize = 2;
pub const DEFAULT_SEARCH_RADIUS_DEG: f64 = 1.0;

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "KOPPEN";
