use anyhow::{Context as _, Result};
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

/// Log levels for the FisioMap desktop shell
#[derive(Debug, Clone, Copy)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Components in the FisioMap desktop shell
#[derive(Debug, Clone, Copy)]
pub enum Component {
    Bridge,
    Permissions,
    Settings,
    UI,
}

impl Component {
    fn as_str(&self) -> &'static str {
        match self {
            Component::Bridge => "BRIDGE",
            Component::Permissions => "PERMISSIONS",
            Component::Settings => "SETTINGS",
            Component::UI => "UI",
        }
    }
}

impl LogLevel {
    fn emoji(&self) -> &'static str {
        match self {
            LogLevel::Debug => "🔍",
            LogLevel::Info => "📊",
            LogLevel::Warn => "⚠️",
            LogLevel::Error => "❌",
        }
    }
}

static LOG_FILE: OnceLock<Mutex<File>> = OnceLock::new();
static LOG_FILE_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Open the session log file under the app data dir. Logging works without
/// this; messages just stay on stdout.
pub fn init_logger(app_data_dir: &Path) -> Result<()> {
    let logs_dir = app_data_dir.join("logs");
    std::fs::create_dir_all(&logs_dir).context("Failed to create logs directory")?;

    let path = logs_dir.join(format!(
        "fisiomap-{}.log",
        Local::now().format("%Y%m%d-%H%M%S")
    ));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .context("Failed to open log file")?;

    let _ = LOG_FILE.set(Mutex::new(file));
    let _ = LOG_FILE_PATH.set(path);

    Ok(())
}

pub fn get_log_file_path() -> Option<PathBuf> {
    LOG_FILE_PATH.get().cloned()
}

/// Log a message with timestamp, component, and level
pub fn log(component: Component, level: LogLevel, message: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!(
        "[{}] {} [{}] {}",
        timestamp,
        level.emoji(),
        component.as_str(),
        message
    );
    println!("{}", line);

    if let Some(file) = LOG_FILE.get() {
        if let Ok(mut file) = file.lock() {
            let _ = writeln!(file, "{}", line);
        }
    }
}

// Convenience functions
pub fn debug(component: Component, message: &str) {
    log(component, LogLevel::Debug, message);
}

pub fn info(component: Component, message: &str) {
    log(component, LogLevel::Info, message);
}

pub fn warn(component: Component, message: &str) {
    log(component, LogLevel::Warn, message);
}

pub fn error(component: Component, message: &str) {
    log(component, LogLevel::Error, message);
}
