//! Rolling Logger
//!
//! `log` backend that keeps the most recent lines in a circular buffer and
//! forwards every line to the browser console (stderr off-wasm).

use std::collections::VecDeque;
use std::sync::{Mutex, OnceLock};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Default number of lines kept in memory
pub const DEFAULT_CAPACITY: usize = 500;

/// Fixed-size buffer of formatted log lines, oldest dropped first
#[derive(Debug)]
pub struct LogRing {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LogRing {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, line: String) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

struct RollingLogger {
    level: LevelFilter,
    ring: Mutex<LogRing>,
}

static LOGGER: OnceLock<RollingLogger> = OnceLock::new();

impl Log for RollingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(
            &chrono::Local::now().format("%H:%M:%S%.3f").to_string(),
            record.level(),
            record.target(),
            &record.args().to_string(),
        );
        emit(record.level(), &line);
        if let Ok(mut ring) = self.ring.lock() {
            ring.push(line);
        }
    }

    fn flush(&self) {}
}

fn format_line(time: &str, level: Level, target: &str, message: &str) -> String {
    format!("[{}] {:<5} {}: {}", time, level, target, message)
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    match level {
        Level::Error => web_sys::console::error_1(&line.into()),
        Level::Warn => web_sys::console::warn_1(&line.into()),
        Level::Info => web_sys::console::info_1(&line.into()),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&line.into()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{}", line);
}

/// Install the logger. Fails if another logger is already set.
pub fn init_logger(level: LevelFilter, capacity: usize) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| RollingLogger {
        level,
        ring: Mutex::new(LogRing::new(capacity)),
    });
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Snapshot of the buffered lines, oldest first
pub fn recent_lines() -> Vec<String> {
    LOGGER
        .get()
        .and_then(|l| l.ring.lock().ok().map(|r| r.lines()))
        .unwrap_or_default()
}
