use crate::error::Result;
use crate::models::GridMapping;
use crate::readers::MappingReader;
use crate::utils::filename::parent_dir;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Writes grid mappings as compact JSON (`{"k":"v",...}`, no inserted whitespace)
pub struct GridJsonWriter;

impl GridJsonWriter {
    pub fn new() -> Self {
        Self
    }

    /// Serialize `mapping` to `path`, replacing whatever was there.
    ///
    /// The document is written to a temporary file next to `path` and renamed
    /// over it, so a failed write leaves the previous contents intact. An
    /// existing file keeps its permissions; a new one gets the umask default.
    /// A missing parent directory is reported as an I/O error.
    pub fn write_mapping(&self, mapping: &GridMapping, path: &Path) -> Result<()> {
        let existing_permissions = fs::metadata(path).ok().map(|m| m.permissions());
        let mut temp_file = Self::create_temp_file(parent_dir(path))?;

        {
            let mut writer = BufWriter::new(temp_file.as_file_mut());
            serde_json::to_writer(&mut writer, mapping)?;
            writer.flush()?;
        }

        if let Some(permissions) = existing_permissions {
            temp_file.as_file().set_permissions(permissions)?;
        }

        temp_file.persist(path)?;

        debug!(path = %path.display(), cells = mapping.len(), "Wrote grid mapping");
        Ok(())
    }

    // Temp files default to 0600; request 0666 so the umask decides, as for a plain create
    fn create_temp_file(dir: &Path) -> Result<NamedTempFile> {
        let mut builder = tempfile::Builder::new();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }

        Ok(builder.tempfile_in(dir)?)
    }

    /// Size and cell count of a written grid file
    pub fn get_file_info(&self, path: &Path) -> Result<GridFileInfo> {
        let file_size = fs::metadata(path)?.len();
        let mapping = MappingReader::read_mapping(path)?;

        Ok(GridFileInfo {
            path: path.to_path_buf(),
            file_size,
            total_cells: mapping.len(),
        })
    }
}

impl Default for GridJsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct GridFileInfo {
    pub path: PathBuf,
    pub file_size: u64,
    pub total_cells: usize,
}

impl GridFileInfo {
    pub fn summary(&self) -> String {
        format!(
            "File: {}\nSize: {:.2} KB\nCells: {}",
            self.path.display(),
            self.file_size as f64 / 1024.0,
            self.total_cells
        )
    }
}
