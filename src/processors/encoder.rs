use crate::error::Result;
use crate::models::{GridMapping, KeySeparator};
use crate::readers::{AsciiGridReader, LineStats};
use crate::writers::GridJsonWriter;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeReport {
    pub lines: LineStats,
    /// Records whose key was already present; the later record's code was kept
    pub duplicate_keys: usize,
    pub total_cells: usize,
}

impl EncodeReport {
    pub fn summary(&self) -> String {
        format!(
            "Encode Summary:\n  Lines read: {}\n  Records accepted: {}\n  Lines skipped: {}\n  Duplicate keys overwritten: {}\n  Cells written: {}",
            self.lines.total_lines,
            self.lines.record_lines,
            self.lines.skipped_lines,
            self.duplicate_keys,
            self.total_cells
        )
    }
}

/// Builds a comma-keyed grid mapping from the ASCII table
pub struct GridEncoder {
    reader: AsciiGridReader,
    writer: GridJsonWriter,
}

impl GridEncoder {
    pub fn new() -> Self {
        Self {
            reader: AsciiGridReader::new(),
            writer: GridJsonWriter::new(),
        }
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.reader = AsciiGridReader::with_mmap(use_mmap);
        self
    }

    /// Encode the table at `input` into a mapping of `"<lat>,<lon>" -> code`
    pub fn encode(&self, input: &Path) -> Result<(GridMapping, EncodeReport)> {
        let mut mapping = GridMapping::new();
        let mut duplicate_keys = 0;

        let lines = self.reader.for_each_record(input, |record| {
            let key = record.key(KeySeparator::Comma);
            if mapping.insert(key, record.code).is_some() {
                duplicate_keys += 1;
            }
        })?;

        if duplicate_keys > 0 {
            warn!(
                duplicate_keys,
                "Duplicate coordinates in grid table; later rows replaced earlier ones"
            );
        }

        let report = EncodeReport {
            lines,
            duplicate_keys,
            total_cells: mapping.len(),
        };

        Ok((mapping, report))
    }

    /// Encode `input` and write the mapping to `output`
    pub fn encode_to_file(&self, input: &Path, output: &Path) -> Result<EncodeReport> {
        let (mapping, report) = self.encode(input)?;
        self.writer.write_mapping(&mapping, output)?;

        info!(
            input = %input.display(),
            output = %output.display(),
            cells = report.total_cells,
            skipped = report.lines.skipped_lines,
            "Encoded grid table"
        );
        Ok(report)
    }
}

impl Default for GridEncoder {
    fn default() -> Self {
        Self::new()
    }
}
