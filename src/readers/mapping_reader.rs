use crate::error::Result;
use crate::models::GridMapping;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Reader for serialized grid mappings
pub struct MappingReader;

impl MappingReader {
    /// Load the whole mapping at `path` into memory.
    ///
    /// The file handle is released before this returns, so callers may write
    /// back to the same path.
    pub fn read_mapping(path: &Path) -> Result<GridMapping> {
        let bytes = fs::read(path)?;
        let mapping: GridMapping = serde_json::from_slice(&bytes)?;

        debug!(path = %path.display(), cells = mapping.len(), "Loaded grid mapping");
        Ok(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_mapping() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        write!(temp_file, r#"{{"40.5,-74.0":"Dfa","10.0,20.0":"Aw"}}"#)?;

        let mapping = MappingReader::read_mapping(temp_file.path())?;
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get("40.5,-74.0"), Some("Dfa"));
        assert_eq!(mapping.keys().next(), Some("40.5,-74.0"));

        Ok(())
    }

    #[test]
    fn test_read_pretty_mapping() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "{{\n  \"1 2\": \"Cfb\"\n}}")?;

        let mapping = MappingReader::read_mapping(temp_file.path())?;
        assert_eq!(mapping.get("1 2"), Some("Cfb"));

        Ok(())
    }

    #[test]
    fn test_non_string_values_rejected() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        write!(temp_file, r#"{{"1,2":3}}"#)?;

        let result = MappingReader::read_mapping(temp_file.path());
        assert!(matches!(result, Err(ProcessingError::Json(_))));

        Ok(())
    }

    #[test]
    fn test_missing_mapping_is_io_error() {
        let result = MappingReader::read_mapping(Path::new("/nonexistent/grid.json"));
        assert!(matches!(result, Err(ProcessingError::Io(_))));
    }
}
