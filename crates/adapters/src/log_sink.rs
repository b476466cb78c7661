//! Log sinks: destinations for pre-encoded log lines.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// A sink that receives pre-formatted log lines.
///
/// Write failures are the sink's concern: they are never surfaced to the
/// logging call site.
pub trait LogSink: Send + Sync {
    /// Write a line to the sink. `line` includes its trailing newline.
    fn write_line(&self, line: &str);

    /// Flush anything the sink buffers.
    fn flush(&self) {}
}

/// Log sink that writes to stderr.
#[derive(Debug, Default)]
pub struct StderrLogSink;

impl LogSink for StderrLogSink {
    fn write_line(&self, line: &str) {
        let mut stderr = io::stderr().lock();
        if let Err(error) = stderr.write_all(line.as_bytes()) {
            eprintln!("log sink write failed: {error}");
        }
    }

    fn flush(&self) {
        if let Err(error) = io::stderr().flush() {
            eprintln!("log sink flush failed: {error}");
        }
    }
}

/// Log sink that appends to a file.
///
/// Lines that fail to write are dropped and the failure is reported on stderr.
#[derive(Debug)]
pub struct FileLogSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileLogSink {
    /// Open `path` for appending, creating the file if needed.
    ///
    /// Parent directories are not created.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }

    /// Destination path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for FileLogSink {
    fn write_line(&self, line: &str) {
        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(error) = file.write_all(line.as_bytes()) {
            eprintln!(
                "log sink write to {} failed: {error}",
                self.path.display()
            );
        }
    }

    fn flush(&self) {
        let file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(error) = file.sync_data() {
            eprintln!("log sink sync of {} failed: {error}", self.path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FileLogSink, LogSink, StderrLogSink};
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file(label: &str) -> PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!("logfacade-sink-{label}-{unique}.log"))
    }

    #[test]
    fn file_sink_appends_lines() -> std::io::Result<()> {
        let path = temp_file("append");
        std::fs::write(&path, "existing\n")?;

        let sink = FileLogSink::open(&path)?;
        sink.write_line("hello\n");
        sink.write_line("world\n");
        sink.flush();

        let contents = std::fs::read_to_string(&path)?;
        assert_eq!(contents, "existing\nhello\nworld\n");
        assert_eq!(sink.path(), path.as_path());
        std::fs::remove_file(&path)?;
        Ok(())
    }

    #[test]
    fn stderr_sink_writes_and_flushes() {
        let sink = StderrLogSink;
        sink.write_line("stderr sink test line\n");
        sink.flush();
    }

    #[test]
    fn file_sink_open_fails_for_missing_directory() {
        let path = std::env::temp_dir()
            .join("logfacade-missing-dir-for-sink-test")
            .join("nested")
            .join("app.log");
        let error = FileLogSink::open(&path).err();
        assert_eq!(
            error.map(|error| error.kind()),
            Some(std::io::ErrorKind::NotFound)
        );
    }
}
