use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{Level, LevelFilter, Log, Metadata, Record};
use once_cell::sync::OnceCell;

static LOGGER: OnceCell<FileLogger> = OnceCell::new();

fn data_dir() -> PathBuf {
    directories::ProjectDirs::from("org", "showdeck", "ShowDeck")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn log_path() -> PathBuf {
    let dir = data_dir();
    let _ = fs::create_dir_all(&dir);
    dir.join("showdeck.log")
}

fn timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{}", now)
}

pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Appends to the log file and echoes warnings and errors to stderr.
struct FileLogger {
    level: LevelFilter,
    file: Mutex<Option<File>>,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {} {}: {}", timestamp(), record.level(), record.target(), record.args());
        if record.level() <= Level::Warn {
            eprintln!("{}", line);
        }
        if let Ok(mut guard) = self.file.lock() {
            if let Some(f) = guard.as_mut() {
                let _ = writeln!(f, "{}", line);
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = self.file.lock() {
            if let Some(f) = guard.as_mut() {
                let _ = f.flush();
            }
        }
    }
}

/// Installs the process logger. Later calls are ignored.
pub fn init(level: &str) {
    let level = parse_level(level);
    let logger = LOGGER.get_or_init(|| {
        let file = OpenOptions::new().create(true).append(true).open(log_path()).ok();
        FileLogger { level, file: Mutex::new(file) }
    });
    if log::set_logger(logger).is_ok() {
        log::set_max_level(logger.level);
    }
}
