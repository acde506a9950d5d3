//! Rolling Logger
//!
//! `log` backend for WASM frontends. Every record goes to the browser
//! console (stderr on native targets) and the most recent records are kept
//! in a circular buffer so the app can inspect them after the fact.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, OnceLock};

use chrono::{DateTime, Local};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// One captured log record
#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub message: String,
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {:<5} {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.level,
            self.message
        )
    }
}

/// Fixed-capacity buffer that drops the oldest line when full
#[derive(Debug)]
pub struct RingBuffer {
    capacity: usize,
    lines: VecDeque<LogLine>,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            lines: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, line: LogLine) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Oldest first
    pub fn lines(&self) -> Vec<LogLine> {
        self.lines.iter().cloned().collect()
    }
}

struct RollingLogger {
    app_name: String,
    buffer: Mutex<RingBuffer>,
}

impl Log for RollingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = LogLine {
            timestamp: Local::now(),
            level: record.level(),
            message: record.args().to_string(),
        };
        write_console(&self.app_name, &line);
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.push(line);
        }
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn write_console(app_name: &str, line: &LogLine) {
    use wasm_bindgen::JsValue;

    let text = JsValue::from_str(&format!("{} {}", app_name, line));
    match line.level {
        Level::Error => web_sys::console::error_1(&text),
        Level::Warn => web_sys::console::warn_1(&text),
        _ => web_sys::console::log_1(&text),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write_console(app_name: &str, line: &LogLine) {
    eprintln!("{} {}", app_name, line);
}

static LOGGER: OnceLock<RollingLogger> = OnceLock::new();

/// Install the logger as the global `log` backend.
///
/// `capacity` is only honored by the first call; later calls fail with
/// `SetLoggerError` because a logger is already installed.
pub fn init_logger(app_name: &str, capacity: usize) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| RollingLogger {
        app_name: app_name.to_string(),
        buffer: Mutex::new(RingBuffer::new(capacity)),
    });
    log::set_logger(logger)?;
    log::set_max_level(LevelFilter::Info);
    Ok(())
}

/// Snapshot of the retained records, oldest first
pub fn recent() -> Vec<LogLine> {
    LOGGER
        .get()
        .and_then(|logger| logger.buffer.lock().ok().map(|buffer| buffer.lines()))
        .unwrap_or_default()
}

/// The last `limit` retained records, oldest first
pub fn recent_tail(limit: usize) -> Vec<LogLine> {
    let lines = recent();
    let skip = lines.len().saturating_sub(limit);
    lines.into_iter().skip(skip).collect()
}
