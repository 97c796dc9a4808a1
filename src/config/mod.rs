use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::BooksError,
    utils::{self, ensure_dir},
};

const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";

/// Installation-wide settings, including the per-company expense category
/// vocabulary that seeds office-expense forms. The vocabulary is open; the
/// engine groups whatever category a record carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default = "Config::default_expense_categories")]
    pub expense_categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_opened_company: Option<String>,
}

impl Config {
    pub fn default_expense_categories() -> Vec<String> {
        ["Rent", "Salaries", "Utilities", "Fuel", "Materials", "Misc"]
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Adds a category unless an equivalent (case-insensitive) one exists.
    pub fn add_expense_category(&mut self, name: impl Into<String>) {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return;
        }
        let exists = self
            .expense_categories
            .iter()
            .any(|existing| existing.eq_ignore_ascii_case(trimmed));
        if !exists {
            self.expense_categories.push(trimmed.to_string());
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-IN".into(),
            currency: "INR".into(),
            expense_categories: Self::default_expense_categories(),
            last_opened_company: None,
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
    backups_dir: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, BooksError> {
        Self::from_base(utils::app_data_dir())
    }

    #[cfg(test)]
    pub fn with_base_dir(base: PathBuf) -> Result<Self, BooksError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, BooksError> {
        ensure_dir(&base)?;
        let config_root = utils::config_dir_in(&base);
        ensure_dir(&config_root)?;
        let backups_dir = utils::config_backups_dir_in(&base);
        ensure_dir(&backups_dir)?;
        Ok(Self {
            path: utils::config_file_in(&base),
            backups_dir,
        })
    }

    pub fn load(&self) -> Result<Config, BooksError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), BooksError> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = utils::tmp_path(&self.path);
        utils::write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn backup(&self, config: &Config, note: Option<&str>) -> Result<String, BooksError> {
        ensure_dir(&self.backups_dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut name = format!("config_{}", timestamp);
        if let Some(label) = utils::sanitize_note(note) {
            name.push('_');
            name.push_str(&label);
        }
        name.push_str(&format!(".{}", BACKUP_EXTENSION));
        let path = self.backups_dir.join(&name);
        let json = serde_json::to_string_pretty(config)?;
        utils::write_file(&path, &json)?;
        Ok(name)
    }

    pub fn restore(&self, backup_name: &str) -> Result<Config, BooksError> {
        let path = self.backups_dir.join(backup_name);
        if !path.exists() {
            return Err(BooksError::ConfigError(format!(
                "configuration backup `{}` not found",
                backup_name
            )));
        }
        let data = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn list_backups(&self) -> Result<Vec<String>, BooksError> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(name.to_string());
            }
        }
        entries.sort_by(|a, b| {
            utils::parse_backup_timestamp(b).cmp(&utils::parse_backup_timestamp(a))
        });
        Ok(entries)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
