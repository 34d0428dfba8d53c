use crate::error::Result;
use crate::models::{GridMapping, KeySeparator};
use crate::readers::MappingReader;
use crate::writers::GridJsonWriter;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub input_cells: usize,
    pub output_cells: usize,
    /// Keys that changed under the rewrite
    pub rewritten_keys: usize,
    /// Distinct input keys that landed on an output key already produced
    pub collisions: usize,
}

impl NormalizeReport {
    pub fn summary(&self) -> String {
        format!(
            "Normalize Summary:\n  Input cells: {}\n  Keys rewritten: {}\n  Collisions: {}\n  Output cells: {}",
            self.input_cells, self.rewritten_keys, self.collisions, self.output_cells
        )
    }
}

/// Rewrites the separator inside every coordinate key of a grid mapping
pub struct KeyNormalizer {
    from: KeySeparator,
    to: KeySeparator,
    writer: GridJsonWriter,
}

impl KeyNormalizer {
    /// Comma-joined keys to space-joined keys
    pub fn new() -> Self {
        Self::with_separators(KeySeparator::Comma, KeySeparator::Space)
    }

    pub fn with_separators(from: KeySeparator, to: KeySeparator) -> Self {
        Self {
            from,
            to,
            writer: GridJsonWriter::new(),
        }
    }

    /// Rewrite the keys of `mapping`, keeping every value.
    ///
    /// When two keys rewrite to the same output key the later one in iteration
    /// order wins and the collision is counted.
    pub fn normalize_mapping(&self, mapping: GridMapping) -> (GridMapping, NormalizeReport) {
        let mut report = NormalizeReport {
            input_cells: mapping.len(),
            ..Default::default()
        };
        let mut normalized = GridMapping::with_capacity(mapping.len());

        for (key, code) in mapping {
            let new_key = self.from.rewrite_key(&key, self.to);
            if new_key != key {
                report.rewritten_keys += 1;
            }
            if normalized.insert(new_key, code).is_some() {
                report.collisions += 1;
            }
        }

        report.output_cells = normalized.len();
        (normalized, report)
    }

    /// Normalize the mapping at `input` and write it to `output`.
    ///
    /// `input` is read completely before `output` is opened, so both may name
    /// the same file.
    pub fn normalize_file(&self, input: &Path, output: &Path) -> Result<NormalizeReport> {
        let mapping = MappingReader::read_mapping(input)?;
        let (normalized, report) = self.normalize_mapping(mapping);

        if report.collisions > 0 {
            warn!(
                collisions = report.collisions,
                "Keys collided after separator rewrite; later entries replaced earlier ones"
            );
        }

        self.writer.write_mapping(&normalized, output)?;

        info!(
            input = %input.display(),
            output = %output.display(),
            from = %self.from,
            to = %self.to,
            cells = report.output_cells,
            "Normalized grid keys"
        );
        Ok(report)
    }
}

impl Default for KeyNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn mapping(entries: &[(&str, &str)]) -> GridMapping {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_comma_to_space() {
        let input = mapping(&[("40.5,-74.0", "Dfa"), ("10.0,20.0", "Aw")]);

        let (output, report) = KeyNormalizer::new().normalize_mapping(input);

        assert_eq!(output, mapping(&[("40.5 -74.0", "Dfa"), ("10.0 20.0", "Aw")]));
        assert_eq!(report.input_cells, 2);
        assert_eq!(report.output_cells, 2);
        assert_eq!(report.rewritten_keys, 2);
        assert_eq!(report.collisions, 0);
    }

    #[test]
    fn test_keys_without_separator_are_copied() {
        let input = mapping(&[("origin", "ET")]);
        let (output, report) = KeyNormalizer::new().normalize_mapping(input.clone());
        assert_eq!(output, input);
        assert_eq!(report.rewritten_keys, 0);
    }

    #[test]
    fn test_idempotent_on_space_keys() {
        let input = mapping(&[("40.5 -74.0", "Dfa"), ("1.25 2.75", "Af")]);
        let normalizer = KeyNormalizer::new();

        let (once, _) = normalizer.normalize_mapping(input.clone());
        let (twice, _) = normalizer.normalize_mapping(once.clone());

        assert_eq!(once, input);
        assert_eq!(twice, input);
    }

    #[test]
    fn test_collision_later_entry_wins() {
        let input = mapping(&[("1,2", "Af"), ("1 2", "Cfb"), ("3,4", "BWh")]);

        let (output, report) = KeyNormalizer::new().normalize_mapping(input);

        assert_eq!(output.len(), 2);
        assert_eq!(output.get("1 2"), Some("Cfb"));
        assert_eq!(report.collisions, 1);
        assert_eq!(report.output_cells, report.input_cells - report.collisions);
    }

    #[test]
    fn test_space_to_comma() {
        let input = mapping(&[("40.5 -74.0", "Dfa")]);
        let normalizer = KeyNormalizer::with_separators(KeySeparator::Space, KeySeparator::Comma);

        let (output, _) = normalizer.normalize_mapping(input);

        assert_eq!(output.get("40.5,-74.0"), Some("Dfa"));
    }

    #[test]
    fn test_normalize_file_in_place() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("grid.json");
        fs::write(&path, r#"{"10.0,20.0":"Aw","-5.5,100.25":"BWh"}"#)?;

        let report = KeyNormalizer::new().normalize_file(&path, &path)?;

        assert_eq!(report.output_cells, 2);
        assert_eq!(
            fs::read_to_string(&path)?,
            r#"{"10.0 20.0":"Aw","-5.5 100.25":"BWh"}"#
        );
        Ok(())
    }
}
