//! Application paths

use std::path::PathBuf;

/// Per-user application directory (`~/.tabula`). Falls back to the current
/// directory when no home directory can be resolved.
pub fn tabula_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tabula")
}

/// Default log destination. Logging goes to a file so the alternate-screen
/// TUI is not corrupted by stray output.
pub fn default_log_path() -> PathBuf {
    tabula_home().join("tabula.log")
}
