use crate::error::Result;
use crate::models::GridRecord;
use crate::utils::constants::{DEFAULT_BUFFER_SIZE, GRID_RECORD_FIELDS};
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Line counts from one pass over a grid table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineStats {
    pub total_lines: usize,
    pub record_lines: usize,
    pub skipped_lines: usize,
}

/// Acceptance policy for table lines: exactly `lat lon code`.
///
/// Blank lines, headers and rows with extra or missing fields fail this check
/// and are dropped by the reader without raising an error.
pub fn is_grid_record(tokens: &[&str]) -> bool {
    tokens.len() == GRID_RECORD_FIELDS
}

/// Parse one table line, splitting on runs of whitespace
pub fn parse_grid_line(line: &str) -> Option<GridRecord> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    if !is_grid_record(&tokens) {
        return None;
    }

    Some(GridRecord::new(
        tokens[0].to_string(),
        tokens[1].to_string(),
        tokens[2].to_string(),
    ))
}

/// Reader for the whitespace-delimited Köppen-Geiger ASCII table
pub struct AsciiGridReader {
    use_mmap: bool,
}

impl AsciiGridReader {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self { use_mmap }
    }

    /// Stream every accepted record of the table at `path` into `sink`
    pub fn for_each_record<F>(&self, path: &Path, sink: F) -> Result<LineStats>
    where
        F: FnMut(GridRecord),
    {
        if self.use_mmap {
            self.read_mmap(path, sink)
        } else {
            self.read_buffered(path, sink)
        }
    }

    /// Read all accepted records of the table at `path`
    pub fn read_records(&self, path: &Path) -> Result<(Vec<GridRecord>, LineStats)> {
        let mut records = Vec::new();
        let stats = self.for_each_record(path, |record| records.push(record))?;
        Ok((records, stats))
    }

    fn read_buffered<F>(&self, path: &Path, mut sink: F) -> Result<LineStats>
    where
        F: FnMut(GridRecord),
    {
        let file = File::open(path)?;
        let mut reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut stats = LineStats::default();
        let mut buf = Vec::with_capacity(64);

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            // A BOM is only meaningful at the start of the file
            let (line, _) = if stats.total_lines == 0 {
                encoding_rs::UTF_8.decode_with_bom_removal(&buf)
            } else {
                encoding_rs::UTF_8.decode_without_bom_handling(&buf)
            };
            Self::accept_line(&line, &mut stats, &mut sink);
        }

        debug!(
            path = %path.display(),
            total = stats.total_lines,
            skipped = stats.skipped_lines,
            "Read grid table"
        );
        Ok(stats)
    }

    fn read_mmap<F>(&self, path: &Path, mut sink: F) -> Result<LineStats>
    where
        F: FnMut(GridRecord),
    {
        let file = File::open(path)?;
        let mut stats = LineStats::default();

        // Mapping a zero-length file fails on some platforms
        if file.metadata()?.len() == 0 {
            return Ok(stats);
        }

        let mmap = unsafe { Mmap::map(&file)? };
        let (content, _) = encoding_rs::UTF_8.decode_with_bom_removal(&mmap);

        for line in content.lines() {
            Self::accept_line(line, &mut stats, &mut sink);
        }

        debug!(
            path = %path.display(),
            total = stats.total_lines,
            skipped = stats.skipped_lines,
            "Read grid table (mmap)"
        );
        Ok(stats)
    }

    fn accept_line<F>(line: &str, stats: &mut LineStats, sink: &mut F)
    where
        F: FnMut(GridRecord),
    {
        stats.total_lines += 1;

        match parse_grid_line(line) {
            Some(record) => {
                stats.record_lines += 1;
                sink(record);
            }
            None => stats.skipped_lines += 1,
        }
    }
}

impl Default for AsciiGridReader {
    fn default() -> Self {
        Self::new()
    }
}
