use std::{
    fs::{File, OpenOptions},
    io::Write,
    path::Path,
    sync::Mutex,
};

use thiserror::Error;
use tracing::warn;

use crate::trace::trace::ResolutionTrace;

/// Appends resolution traces to a file as JSON lines.
///
/// Write failures are logged through `tracing` and never abort a resolve.
pub struct TraceLogger {
    file: Option<Mutex<File>>,
}

impl TraceLogger {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let file = OpenOptions::new().create(true).append(true).open(path);

        match file {
            Ok(f) => Self {
                file: Some(Mutex::new(f)),
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not open trace file");
                Self { file: None }
            }
        }
    }

    /// A logger that drops every event.
    pub fn disabled() -> Self {
        Self { file: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    pub fn log(&self, event: &ResolutionTrace) {
        let Some(file) = &self.file else {
            return;
        };

        if let Err(e) = append_line(file, event) {
            warn!(error = %e, "trace event dropped");
        }
    }
}

#[derive(Debug, Error)]
enum AppendError {
    #[error("failed to serialize trace event: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("trace file lock poisoned")]
    Poisoned,

    #[error("failed to write trace event: {0}")]
    Write(#[from] std::io::Error),
}

fn append_line(file: &Mutex<File>, event: &ResolutionTrace) -> Result<(), AppendError> {
    let json = serde_json::to_string(event)?;
    let mut file = file.lock().map_err(|_| AppendError::Poisoned)?;
    writeln!(file, "{}", json)?;
    Ok(())
}
