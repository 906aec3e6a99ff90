//! Output writers for simulation results.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::metrics::GameMetrics;
use crate::types::OutputFormat;

pub struct OutputWriter {
    writer: BufWriter<File>,
    format: OutputFormat,
    /// Held back until `finish` for the JSON array format.
    buffered: Vec<GameMetrics>,
    path: PathBuf,
}

impl OutputWriter {
    pub fn new(output_dir: &str, format: &OutputFormat) -> Result<Self, Box<dyn std::error::Error>> {
        let dir = Path::new(output_dir);
        std::fs::create_dir_all(dir)?;

        let timestamp = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Iso8601::DEFAULT)
            .unwrap_or_else(|_| "unknown".to_string())
            .replace(':', "-");
        let extension = match format {
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Json => "json",
        };
        let (file, path) = create_unique(dir, &format!("simulation_{timestamp}"), extension)?;

        Ok(Self {
            writer: BufWriter::new(file),
            format: format.clone(),
            buffered: Vec::new(),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_game(&mut self, metrics: &GameMetrics) -> Result<(), Box<dyn std::error::Error>> {
        match self.format {
            OutputFormat::Jsonl => {
                let json = serde_json::to_string(metrics)?;
                writeln!(self.writer, "{json}")?;
            }
            OutputFormat::Json => self.buffered.push(metrics.clone()),
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<PathBuf, Box<dyn std::error::Error>> {
        if matches!(self.format, OutputFormat::Json) {
            serde_json::to_writer_pretty(&mut self.writer, &self.buffered)?;
            writeln!(self.writer)?;
        }
        self.writer.flush()?;
        Ok(self.path)
    }
}

/// Open `<stem>.<ext>`, or `<stem>_<n>.<ext>` if earlier runs already took the name.
fn create_unique(dir: &Path, stem: &str, extension: &str) -> io::Result<(File, PathBuf)> {
    let mut attempt = 0u32;
    loop {
        let name = match attempt {
            0 => format!("{stem}.{extension}"),
            n => format!("{stem}_{n}.{extension}"),
        };
        let path = dir.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((file, path)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => return Err(e),
        }
    }
}
