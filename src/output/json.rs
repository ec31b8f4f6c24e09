//! JSON report files.

use crate::aggregator::CriticalPathReport;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Write a report as pretty-printed JSON
///
/// Missing parent directories are created.
///
/// # Errors
/// * `OutputError::InvalidPath` - empty path, directory, or uncreatable parent
/// * `OutputError::SerializationFailed` - the report could not be encoded
/// * `OutputError::WriteFailed` - I/O error during write
pub fn write_report(
    report: &CriticalPathReport,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    super::validate_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let mut writer = BufWriter::new(File::create(output_path)?);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!(
        "Report with {} frames written to {}",
        report.critical_path.len(),
        output_path.display()
    );

    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    if parent.exists() {
        return Ok(());
    }

    debug!("Creating parent directories: {}", parent.display());
    fs::create_dir_all(parent).map_err(|e| {
        OutputError::InvalidPath(format!("Cannot create directory {}: {}", parent.display(), e))
    })
}

/// Read a report written by `write_report`
///
/// # Errors
/// * `OutputError::ReadFailed` - the file could not be opened or read
/// * `OutputError::DeserializationFailed` - the file is not a valid report
pub fn read_report(input_path: impl AsRef<Path>) -> Result<CriticalPathReport, OutputError> {
    let input_path = input_path.as_ref();
    let file = File::open(input_path).map_err(OutputError::ReadFailed)?;

    let report: CriticalPathReport = serde_json::from_reader(BufReader::new(file))
        .map_err(OutputError::DeserializationFailed)?;

    debug!(
        "Loaded report v{} from {} ({} samples)",
        report.version,
        input_path.display(),
        report.sample_count
    );

    Ok(report)
}
