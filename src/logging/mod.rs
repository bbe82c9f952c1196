//! Structured JSON-line logging for the store, editor, and drivers.
//!
//! Every record is a single `serde_json` object. Sinks decide where the
//! line goes; the [`Logger`] handle is cheap to clone and can be shared
//! between the store and the editor session.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

pub const STORE_TARGET: &str = "bento::store";
pub const EDITOR_TARGET: &str = "bento::editor";
pub const METRICS_TARGET: &str = "bento::editor.metrics";
pub const DRIVER_TARGET: &str = "bento::driver";

/// Environment variable naming a log file for [`Logger::from_env`].
pub const LOG_FILE_ENV: &str = "BENTO_LOG_FILE";
/// Environment variable holding the minimum level for [`Logger::from_env`].
pub const LOG_LEVEL_ENV: &str = "BENTO_LOG_LEVEL";
/// File size at which [`FileSink`] rotates when built from the environment.
pub const DEFAULT_MAX_BYTES: u64 = 1024 * 1024;

pub type LogFields = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse a case-insensitive level name such as `"warn"`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Self::Trace),
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" | "warning" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

/// One structured record. Serializes to a single JSON line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    pub ts_ms: u64,
    pub level: LogLevel,
    pub target: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "LogFields::is_empty")]
    pub fields: LogFields,
}

impl LogEvent {
    pub fn new(level: LogLevel, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_fields(level, target, message, LogFields::new())
    }

    pub fn with_fields(
        level: LogLevel,
        target: impl Into<String>,
        message: impl Into<String>,
        fields: LogFields,
    ) -> Self {
        Self {
            ts_ms: unix_millis(),
            level,
            target: target.into(),
            message: message.into(),
            fields,
        }
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}

pub type LoggingResult<T> = std::result::Result<T, LoggingError>;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("log sink poisoned")]
    Poisoned,
}

pub trait LogSink: Send + Sync {
    fn log(&self, event: &LogEvent) -> LoggingResult<()>;
}

/// Shared logging handle with a minimum level filter.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
    min_level: LogLevel,
}

impl Logger {
    pub fn new<S>(sink: S) -> Self
    where
        S: LogSink + 'static,
    {
        Self {
            sink: Arc::new(sink),
            min_level: LogLevel::Trace,
        }
    }

    /// File logger configured from `BENTO_LOG_FILE` and `BENTO_LOG_LEVEL`.
    ///
    /// Returns `Ok(None)` when no log file is configured. An unknown level
    /// name falls back to `info`.
    pub fn from_env() -> LoggingResult<Option<Self>> {
        let Some(path) = std::env::var_os(LOG_FILE_ENV) else {
            return Ok(None);
        };
        let level = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .and_then(|name| LogLevel::from_name(&name))
            .unwrap_or(LogLevel::Info);
        let sink = FileSink::new(PathBuf::from(path), DEFAULT_MAX_BYTES)?;
        Ok(Some(Self::new(sink).with_min_level(level)))
    }

    /// Drop events below `level` before they reach the sink.
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn log(&self, level: LogLevel, target: &str, message: &str) -> LoggingResult<()> {
        self.log_event(LogEvent::new(level, target, message))
    }

    pub fn log_event(&self, event: LogEvent) -> LoggingResult<()> {
        if !self.enabled(event.level) {
            return Ok(());
        }
        self.sink.log(&event)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.min_level)
            .finish_non_exhaustive()
    }
}

/// Appends JSON lines to a file. When the next line would push the file
/// past `max_bytes`, the current file is moved to `<path>.1` (replacing
/// any older backup) and a fresh file is started. `max_bytes == 0`
/// disables rotation.
pub struct FileSink {
    path: PathBuf,
    backup: PathBuf,
    max_bytes: u64,
    state: Mutex<FileState>,
}

struct FileState {
    writer: BufWriter<File>,
    written: u64,
}

impl FileSink {
    pub fn new(path: impl AsRef<Path>, max_bytes: u64) -> LoggingResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut backup = path.clone().into_os_string();
        backup.push(".1");
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            path,
            backup: PathBuf::from(backup),
            max_bytes,
            state: Mutex::new(FileState {
                writer: BufWriter::new(file),
                written,
            }),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup
    }

    fn rotate(&self, state: &mut FileState) -> LoggingResult<()> {
        state.writer.flush()?;
        fs::rename(&self.path, &self.backup)?;
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        state.writer = BufWriter::new(file);
        state.written = 0;
        Ok(())
    }
}

impl LogSink for FileSink {
    fn log(&self, event: &LogEvent) -> LoggingResult<()> {
        let mut line = serde_json::to_vec(event)?;
        line.push(b'\n');
        let incoming = line.len() as u64;

        let mut state = self.state.lock().map_err(|_| LoggingError::Poisoned)?;
        if self.max_bytes > 0 && state.written > 0 && state.written + incoming > self.max_bytes {
            self.rotate(&mut state)?;
        }
        state.writer.write_all(&line)?;
        state.writer.flush()?;
        state.written += incoming;
        Ok(())
    }
}

/// Keeps serialized lines in memory. Clones share the same buffer.
#[derive(Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Buffered records decoded back into events.
    pub fn events(&self) -> Vec<LogEvent> {
        self.lines()
            .iter()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    /// Messages of every buffered record, in order.
    pub fn messages(&self) -> Vec<String> {
        self.events().into_iter().map(|event| event.message).collect()
    }
}

impl LogSink for MemorySink {
    fn log(&self, event: &LogEvent) -> LoggingResult<()> {
        let line = serde_json::to_string(event)?;
        self.lines
            .lock()
            .map_err(|_| LoggingError::Poisoned)?
            .push(line);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _event: &LogEvent) -> LoggingResult<()> {
        Ok(())
    }
}

pub fn event_with_fields(
    level: LogLevel,
    target: &str,
    message: &str,
    fields: impl IntoIterator<Item = (String, Value)>,
) -> LogEvent {
    LogEvent::with_fields(level, target, message, fields.into_iter().collect())
}

/// Field entry for any JSON-convertible value.
pub fn field(key: &str, value: impl Into<Value>) -> (String, Value) {
    (key.to_owned(), value.into())
}

/// Field entry for a string value.
pub fn text_field(key: &str, value: impl Into<String>) -> (String, Value) {
    (key.to_owned(), Value::String(value.into()))
}
