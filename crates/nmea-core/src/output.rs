//! Timestamped output file.

use std::fs::File;
use std::io::{self, LineWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

/// `NMEA-v<version>-<YYYY>-<Mon>-<DD>_<HH>.<MM>.<SS>.txt` in local time.
pub fn output_file_name(version: &str, started: DateTime<Local>) -> String {
    format!(
        "NMEA-v{version}{}",
        started.format("-%Y-%b-%d_%H.%M.%S.txt")
    )
}

/// Line-buffered writer over the run's output file.
///
/// Each completed sentence line reaches the file as soon as it is written, so
/// an interrupted run keeps everything emitted so far. [`OutputTarget::finish`]
/// flushes any trailing partial line and reports the error, if any.
pub struct OutputTarget {
    path: PathBuf,
    writer: LineWriter<File>,
}

impl OutputTarget {
    /// Creates the output file in `dir`, named after the current local time.
    pub fn create(dir: &Path, version: &str) -> io::Result<Self> {
        Self::create_at(dir, version, Local::now())
    }

    pub fn create_at(dir: &Path, version: &str, started: DateTime<Local>) -> io::Result<Self> {
        let path = dir.join(output_file_name(version, started));
        let file = File::create(&path)?;
        info!(path = %path.display(), "output created");
        Ok(Self {
            path,
            writer: LineWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flushes buffered lines and returns the file path.
    pub fn finish(self) -> io::Result<PathBuf> {
        let Self { path, mut writer } = self;
        writer.flush()?;
        Ok(path)
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
