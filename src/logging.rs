//! Crate logging
//!
//! File-backed logger shared by the installer and setup paths. Each line
//! carries a timestamp and level prefix and is mirrored to stderr.

use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};

static LOGGER: OnceLock<Arc<Mutex<Logger>>> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogLevel {
    Info,
    Install,
    Warning,
    Error,
}

impl LogLevel {
    pub fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Info => "[INFO]",
            LogLevel::Install => "[INSTALL]",
            LogLevel::Warning => "[WARNING]",
            LogLevel::Error => "[ERROR]",
        }
    }
}

pub struct Logger {
    log_file: Option<File>,
}

impl Logger {
    fn new() -> Self {
        let log_file = log_dir().and_then(|dir| {
            fs::create_dir_all(&dir).ok()?;
            let timestamp = Local::now().format("%Y%m%d_%H%M%S");
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join(format!("witcher3_{}.log", timestamp)))
                .ok()
        });
        Self { log_file }
    }

    fn write_raw(&mut self, msg: &str) {
        if let Some(ref mut file) = self.log_file {
            let _ = writeln!(file, "{}", msg);
            let _ = file.flush();
        }
        eprintln!("{}", msg);
    }

    pub fn log(&mut self, level: LogLevel, message: &str) {
        let timestamp = Local::now().format("%H:%M:%S");
        let formatted = format!("[{}] {} {}", timestamp, level.prefix(), message);
        self.write_raw(&formatted);
    }
}

fn log_dir() -> Option<PathBuf> {
    Some(dirs::data_local_dir()?.join("game-witcher3").join("logs"))
}

/// Initialize the global logger (call once at startup)
pub fn init_logger() {
    LOGGER.get_or_init(|| Arc::new(Mutex::new(Logger::new())));
}

/// Get the global logger instance
fn logger() -> Arc<Mutex<Logger>> {
    LOGGER
        .get_or_init(|| Arc::new(Mutex::new(Logger::new())))
        .clone()
}

pub fn log_info(message: &str) {
    if let Ok(mut log) = logger().lock() {
        log.log(LogLevel::Info, message);
    }
}

pub fn log_install(message: &str) {
    if let Ok(mut log) = logger().lock() {
        log.log(LogLevel::Install, message);
    }
}

pub fn log_warning(message: &str) {
    if let Ok(mut log) = logger().lock() {
        log.log(LogLevel::Warning, message);
    }
}

pub fn log_error(message: &str) {
    if let Ok(mut log) = logger().lock() {
        log.log(LogLevel::Error, message);
    }
}
