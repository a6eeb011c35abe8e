use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::export::{base_name, pass_rows, ExportError, TrajectoryDocument, CSV_HEADER};
use crate::passes::{Pass, Track};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Written(PathBuf),
    /// A file from an earlier run was left untouched.
    AlreadyExists(PathBuf),
    /// Nothing to write for this pass.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub csv: FileOutcome,
    pub json: FileOutcome,
}

/// Writes per-pass CSV tables and JSON trajectories into one directory.
/// Existing files are never overwritten.
pub struct PassExporter {
    output_dir: PathBuf,
}

impl PassExporter {
    pub fn new(output_dir: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn export(
        &self,
        pass: &Pass,
        center_drift_hz: i64,
        track: Option<&Track>,
    ) -> Result<ExportOutcome, ExportError> {
        let Some(stem) = base_name(pass) else {
            return Ok(ExportOutcome {
                csv: FileOutcome::Skipped,
                json: FileOutcome::Skipped,
            });
        };

        let csv = self.write_csv(&stem, pass, center_drift_hz)?;
        let json = match track {
            Some(track) => self.write_json(&stem, track)?,
            None => FileOutcome::Skipped,
        };

        Ok(ExportOutcome { csv, json })
    }

    fn write_csv(
        &self,
        stem: &str,
        pass: &Pass,
        center_drift_hz: i64,
    ) -> Result<FileOutcome, ExportError> {
        let path = self.output_dir.join(format!("{}.csv", stem));
        let Some(file) = create_new(&path)? else {
            log::info!("{} already exists, skipping", path.display());
            return Ok(FileOutcome::AlreadyExists(path));
        };

        let rows = pass_rows(pass, center_drift_hz);
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", CSV_HEADER.join(","))?;
        for row in &rows {
            writeln!(writer, "{}", row.to_csv_record())?;
        }
        writer.flush()?;

        log::info!("Exported {} echoes to: {}", rows.len(), file_name(&path));
        Ok(FileOutcome::Written(path))
    }

    fn write_json(&self, stem: &str, track: &Track) -> Result<FileOutcome, ExportError> {
        let path = self.output_dir.join(format!("{}.json", stem));
        let Some(file) = create_new(&path)? else {
            log::info!("{} already exists, skipping", path.display());
            return Ok(FileOutcome::AlreadyExists(path));
        };

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &TrajectoryDocument::from(track))?;
        writer.flush()?;

        log::info!(
            "Saved tracking path ({} points) to: {}",
            track.points.len(),
            file_name(&path)
        );
        Ok(FileOutcome::Written(path))
    }
}

/// Open `path` for writing only if it does not exist yet.
fn create_new(path: &Path) -> io::Result<Option<File>> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => Ok(Some(file)),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(None),
        Err(e) => Err(e),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
