//! Tracing setup, filesystem path helpers, and the file-writing primitives
//! shared by company storage and configuration management.

use std::io::Write as _;
use std::sync::Once;
use std::{env, fs, path::Path, path::PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use dirs::home_dir;

use crate::errors::Result;

const DEFAULT_DIR_NAME: &str = ".sitebook_core";
const COMPANIES_DIR: &str = "companies";
const BACKUP_DIR: &str = "backups";
const CONFIG_DIR: &str = "config";
const CONFIG_BACKUP_DIR: &str = "config_backups";
const STATE_FILE: &str = "state.json";
const BACKUP_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("sitebook_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

/// Returns the application data directory, defaulting to `~/.sitebook_core`.
/// The `SITEBOOK_HOME` environment variable overrides it.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("SITEBOOK_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Resolves an explicit base directory or falls back to [`app_data_dir`].
pub fn resolve_base(base: Option<PathBuf>) -> PathBuf {
    base.unwrap_or_else(app_data_dir)
}

/// Directory holding one JSON file per company.
pub fn companies_dir_in(base: &Path) -> PathBuf {
    base.join(COMPANIES_DIR)
}

/// Base directory for per-company backup snapshots.
pub fn backups_dir_in(base: &Path) -> PathBuf {
    base.join(BACKUP_DIR)
}

/// Directory holding the active configuration file.
pub fn config_dir_in(base: &Path) -> PathBuf {
    base.join(CONFIG_DIR)
}

/// Path to the active configuration file.
pub fn config_file_in(base: &Path) -> PathBuf {
    config_dir_in(base).join("config.json")
}

/// Directory containing configuration backups.
pub fn config_backups_dir_in(base: &Path) -> PathBuf {
    base.join(CONFIG_BACKUP_DIR)
}

/// Path to the shared state file (tracking the last opened company, etc.).
pub fn state_file_in(base: &Path) -> PathBuf {
    base.join(STATE_FILE)
}

/// Creates `path` and any missing parents.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Lowercases a free-form backup note into a dash-separated file label.
/// Returns `None` when nothing usable survives.
pub(crate) fn sanitize_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    if raw.is_empty() {
        return None;
    }
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if ch.is_whitespace() || matches!(ch, '-' | '.') {
            if !sanitized.is_empty() && !last_dash {
                sanitized.push('-');
                last_dash = true;
            }
        }
    }
    let trimmed = sanitized.trim_matches('-').to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Extracts the creation time from a backup file name. Names look like
/// `<stem>_<yyyymmdd>_<hhmm>[_<note>].json`; the adjacent date/time pair is
/// found wherever it sits.
pub(crate) fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let stem = name.strip_suffix(&format!(".{}", BACKUP_EXTENSION))?;
    let parts: Vec<&str> = stem.split('_').collect();
    for window in parts.windows(2) {
        if is_digits(window[0], 8) && is_digits(window[1], 4) {
            let raw = format!("{}{}", window[0], window[1]);
            return NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M")
                .ok()
                .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc));
        }
    }
    None
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

/// Sibling temp-file path used for atomic replacement of `path`.
pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Writes `data` to `path`, creating missing parents. Writes in place;
/// callers that need atomic replacement write to [`tmp_path`] first and
/// rename over the target.
pub(crate) fn write_file(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = fs::File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
