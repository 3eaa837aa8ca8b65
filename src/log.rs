//! Simple file-based logging for debugging

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Log file name inside the data directory
pub const LOG_FILE_NAME: &str = "selfnote.log";

static LOG_FILE: Mutex<Option<File>> = Mutex::new(None);

/// Get the directory where the executable is located
pub fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .unwrap_or_else(|_| PathBuf::from("selfnote.exe"))
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Initialize logging to `selfnote.log` inside `dir`, truncating any previous run
pub fn init(dir: &Path) {
    // First run: the data directory may not exist yet
    let _ = std::fs::create_dir_all(dir);
    let log_path = dir.join(LOG_FILE_NAME);

    if let Ok(file) = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&log_path)
    {
        if let Ok(mut guard) = LOG_FILE.lock() {
            *guard = Some(file);
        }
    }

    log("=== SelfNote Log Started ===");
}

/// Stop logging and close the file
pub fn shutdown() {
    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = None;
    }
}

fn timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%d %H:%M:%S%.3f")
        .to_string()
}

/// Log a message to the file (no-op until `init` succeeds)
pub fn log(msg: &str) {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(ref mut file) = *guard {
            let _ = writeln!(file, "[{}] {}", timestamp(), msg);
            let _ = file.flush();
        }
    }
}

/// Log a formatted message
#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::log::log(&format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_dir_and_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("SelfNoteData");

        init(&nested);
        log!("first run {}", 1);
        init(&nested);
        log!("second run");
        shutdown();

        let written = std::fs::read_to_string(nested.join(LOG_FILE_NAME)).unwrap();
        assert!(written.contains("second run"));
        assert!(!written.contains("first run"));
        assert!(written.starts_with('['));
    }
}
