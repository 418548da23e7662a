//! XDG-compliant log directory management
//!
//! Logs are stored in `$XDG_STATE_HOME/termfolio/logs/` (typically
//! `~/.local/state/termfolio/logs/`). The terminal belongs to the UI, so
//! nothing is ever logged to stdout or stderr while it runs.
//!
//! Each instance writes a PID-based log file. On startup, log files older
//! than a day that belong to other processes are removed.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::{Duration, SystemTime};

/// Minimum age for log files to be cleaned up (24 hours)
const CLEANUP_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// Cached log directory path
static LOG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Get the base log directory, creating it if necessary.
///
/// Falls back to the system temp directory if no state directory is known or
/// it cannot be created.
pub fn log_dir() -> &'static PathBuf {
    LOG_DIR.get_or_init(|| {
        let dir = xdg_log_dir().unwrap_or_else(fallback_log_dir);

        if let Err(e) = fs::create_dir_all(&dir) {
            tracing::warn!("Failed to create log directory {:?}: {}", dir, e);
            return fallback_log_dir();
        }

        dir
    })
}

fn fallback_log_dir() -> PathBuf {
    std::env::temp_dir().join("termfolio-logs")
}

/// Get the XDG state home log directory
fn xdg_log_dir() -> Option<PathBuf> {
    if let Ok(state_home) = std::env::var("XDG_STATE_HOME") {
        let path = PathBuf::from(state_home);
        if path.is_absolute() {
            return Some(path.join("termfolio").join("logs"));
        }
    }

    dirs::state_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("state")))
        .map(|state| state.join("termfolio").join("logs"))
}

/// Path of the log file for this process: `{log_dir}/termfolio-{PID}.log`
pub fn main_log_path() -> PathBuf {
    log_dir().join(format!("termfolio-{}.log", std::process::id()))
}

/// Remove stale log files left behind by earlier runs.
pub fn cleanup_stale_logs() {
    cleanup_stale_logs_in_dir(log_dir(), std::process::id(), CLEANUP_AGE);
}

fn cleanup_stale_logs_in_dir(dir: &Path, current_pid: u32, max_age: Duration) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let file_name = entry.file_name();
        let name = file_name.to_string_lossy();

        if !name.ends_with(".log") {
            continue;
        }

        let Some(pid) = extract_pid_from_filename(&name) else {
            continue;
        };

        // Don't remove our own log file
        if pid == current_pid {
            continue;
        }

        if entry.file_type().map(|t| t.is_file()).unwrap_or(false)
            && is_file_older_than(&entry.path(), max_age)
        {
            if let Err(e) = fs::remove_file(entry.path()) {
                tracing::debug!("Failed to clean up stale log {:?}: {}", entry.path(), e);
            } else {
                tracing::debug!("Cleaned up stale log file: {:?}", entry.path());
            }
        }
    }
}

/// Check if a file is older than the specified duration
fn is_file_older_than(path: &Path, age: Duration) -> bool {
    let Ok(metadata) = fs::metadata(path) else {
        return false;
    };

    let Ok(modified) = metadata.modified() else {
        return false;
    };

    SystemTime::now()
        .duration_since(modified)
        .map(|elapsed| elapsed > age)
        .unwrap_or(false)
}

/// Extract PID from a filename like "termfolio-12345.log"
fn extract_pid_from_filename(name: &str) -> Option<u32> {
    let without_ext = name.strip_suffix(".log")?;
    let last_hyphen = without_ext.rfind('-')?;
    without_ext[last_hyphen + 1..].parse().ok()
}
