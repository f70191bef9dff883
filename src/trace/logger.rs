use std::fs::{File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::trace::trace::GenerationEvent;

/// Append-only JSONL log of builder operations, owned by one
/// [`PageObjectBuilder`](crate::builder::page_object_builder::PageObjectBuilder).
///
/// Missing parent directories are created. A logger whose file could not be
/// opened behaves like [`disabled`](Self::disabled); trace failures never
/// abort generation.
pub struct TraceLogger {
    sink: Option<(PathBuf, LineWriter<File>)>,
    written: usize,
}

impl TraceLogger {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match open_append(path) {
            Ok(file) => {
                debug!(path = %path.display(), "tracing builder operations");
                Self {
                    sink: Some((path.to_path_buf(), LineWriter::new(file))),
                    written: 0,
                }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not open trace file");
                Self::disabled()
            }
        }
    }

    pub fn disabled() -> Self {
        Self {
            sink: None,
            written: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.sink.as_ref().map(|(path, _)| path.as_path())
    }

    /// Events written by this logger so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn log(&mut self, event: &GenerationEvent) {
        let Some((path, writer)) = self.sink.as_mut() else {
            return;
        };

        let json = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                warn!(operation = %event.operation, error = %e, "failed to serialize trace event");
                return;
            }
        };

        match writeln!(writer, "{json}") {
            Ok(()) => self.written += 1,
            Err(e) => warn!(path = %path.display(), error = %e, "failed to write trace event"),
        }
    }
}

fn open_append(path: &Path) -> std::io::Result<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

impl std::fmt::Debug for TraceLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceLogger")
            .field("path", &self.path())
            .field("written", &self.written)
            .finish()
    }
}
