use crate::error::{ProcessingError, Result};
use std::fmt;
use validator::Validate;

#[derive(Debug, Clone, Copy, Validate)]
pub struct LookupQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

impl LookupQuery {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Reject non-finite coordinates, then check the range constraints.
    ///
    /// Range validation alone lets NaN through since every comparison with it is false.
    pub fn check(&self) -> Result<()> {
        for (name, value) in [("latitude", self.latitude), ("longitude", self.longitude)] {
            if !value.is_finite() {
                return Err(ProcessingError::InvalidCoordinate(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
        }

        self.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchKind {
    Exact,
    Nearest { distance: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LookupResult {
    /// Key that was looked up after snapping to the cell centre
    pub snapped_key: String,
    /// Key of the grid cell that answered
    pub matched_key: String,
    pub code: String,
    pub match_kind: MatchKind,
}

impl LookupResult {
    pub fn is_exact(&self) -> bool {
        matches!(self.match_kind, MatchKind::Exact)
    }
}

impl fmt::Display for LookupResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.match_kind {
            MatchKind::Exact => write!(f, "{} (exact: {})", self.code, self.matched_key),
            MatchKind::Nearest { distance } => write!(
                f,
                "{} ({} nearest: {}, dist: {:.2}°)",
                self.code, self.snapped_key, self.matched_key, distance
            ),
        }
    }
}
