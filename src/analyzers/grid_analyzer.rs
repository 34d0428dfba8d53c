use crate::error::Result;
use crate::models::{GridMapping, KeySeparator};
use crate::readers::MappingReader;
use crate::utils::coordinates::parse_key_coordinates;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct GeographicBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl GeographicBounds {
    fn from_point(lat: f64, lon: f64) -> Self {
        Self {
            min_lat: lat,
            max_lat: lat,
            min_lon: lon,
            max_lon: lon,
        }
    }

    fn include(&mut self, lat: f64, lon: f64) {
        self.min_lat = self.min_lat.min(lat);
        self.max_lat = self.max_lat.max(lat);
        self.min_lon = self.min_lon.min(lon);
        self.max_lon = self.max_lon.max(lon);
    }
}

#[derive(Debug, Clone)]
pub struct GridSummary {
    pub total_cells: usize,
    pub separator: KeySeparator,
    /// `None` when no key parses as a coordinate pair
    pub bounds: Option<GeographicBounds>,
    pub unparseable_keys: usize,
    /// Cells per code, most frequent first, ties by code
    pub code_counts: Vec<(String, usize)>,
}

impl GridSummary {
    pub fn distinct_codes(&self) -> usize {
        self.code_counts.len()
    }

    pub fn code_percentage(&self, code: &str) -> f64 {
        if self.total_cells == 0 {
            return 0.0;
        }
        self.code_counts
            .iter()
            .find(|(c, _)| c == code)
            .map_or(0.0, |(_, n)| (*n as f64 / self.total_cells as f64) * 100.0)
    }

    pub fn display_summary(&self) -> String {
        let mut summary = format!(
            "Grid Summary:\n  Total Cells: {}\n  Key Separator: {}\n  Distinct Codes: {}\n",
            self.total_cells,
            self.separator,
            self.distinct_codes()
        );

        if let Some(bounds) = &self.bounds {
            summary.push_str(&format!(
                "  Latitude Range: {} to {}\n  Longitude Range: {} to {}\n",
                bounds.min_lat, bounds.max_lat, bounds.min_lon, bounds.max_lon
            ));
        }

        if self.unparseable_keys > 0 {
            summary.push_str(&format!("  Unparseable Keys: {}\n", self.unparseable_keys));
        }

        summary.push_str("  Cells per Code:\n");
        for (code, count) in &self.code_counts {
            summary.push_str(&format!(
                "    {:<4} {:>7} ({:.1}%)\n",
                code,
                count,
                self.code_percentage(code)
            ));
        }

        summary
    }
}

pub struct GridAnalyzer;

impl GridAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze_file(&self, path: &Path) -> Result<GridSummary> {
        let mapping = MappingReader::read_mapping(path)?;
        Ok(self.analyze(&mapping))
    }

    pub fn analyze(&self, mapping: &GridMapping) -> GridSummary {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut bounds: Option<GeographicBounds> = None;
        let mut unparseable_keys = 0;

        for (key, code) in mapping.iter() {
            *counts.entry(code).or_default() += 1;

            match parse_key_coordinates(key) {
                Some((lat, lon)) => match bounds.as_mut() {
                    Some(b) => b.include(lat, lon),
                    None => bounds = Some(GeographicBounds::from_point(lat, lon)),
                },
                None => unparseable_keys += 1,
            }
        }

        let mut code_counts: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(code, n)| (code.to_string(), n))
            .collect();
        code_counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        GridSummary {
            total_cells: mapping.len(),
            separator: mapping.detect_separator(),
            bounds,
            unparseable_keys,
            code_counts,
        }
    }
}

impl Default for GridAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grid(entries: &[(&str, &str)]) -> GridMapping {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_analyze_counts_and_bounds() {
        let mapping = grid(&[
            ("10.25 20.75", "Aw"),
            ("-5.25 100.25", "BWh"),
            ("60.75 -150.25", "Dfc"),
            ("11.25 21.75", "Aw"),
        ]);

        let summary = GridAnalyzer::new().analyze(&mapping);

        assert_eq!(summary.total_cells, 4);
        assert_eq!(summary.separator, KeySeparator::Space);
        assert_eq!(summary.distinct_codes(), 3);
        assert_eq!(
            summary.code_counts,
            vec![
                ("Aw".to_string(), 2),
                ("BWh".to_string(), 1),
                ("Dfc".to_string(), 1),
            ]
        );
        assert_eq!(
            summary.bounds,
            Some(GeographicBounds {
                min_lat: -5.25,
                max_lat: 60.75,
                min_lon: -150.25,
                max_lon: 100.25,
            })
        );
        let total: usize = summary.code_counts.iter().map(|(_, n)| n).sum();
        assert_eq!(total, summary.total_cells);
        assert_eq!(summary.code_percentage("Aw"), 50.0);
    }

    #[test]
    fn test_unparseable_keys_counted() {
        let mapping = grid(&[("1.25,2.75", "Cfb"), ("somewhere", "ET")]);

        let summary = GridAnalyzer::new().analyze(&mapping);

        assert_eq!(summary.unparseable_keys, 1);
        assert_eq!(summary.separator, KeySeparator::Comma);
        assert!(summary.display_summary().contains("Unparseable Keys: 1"));
    }

    #[test]
    fn test_empty_grid() {
        let summary = GridAnalyzer::new().analyze(&GridMapping::new());
        assert_eq!(summary.total_cells, 0);
        assert!(summary.bounds.is_none());
        assert_eq!(summary.code_percentage("Af"), 0.0);
        assert!(summary.display_summary().contains("Total Cells: 0"));
    }
}
