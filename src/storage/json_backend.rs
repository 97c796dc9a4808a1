use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    domain::CompanyBooks,
    errors::BooksError,
    utils::{self, ensure_dir},
};

use super::{Result, StorageBackend};

const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";
const DEFAULT_RETENTION: usize = 5;

/// File-per-company JSON storage with timestamped backups.
#[derive(Clone)]
pub struct JsonStorage {
    root: PathBuf,
    companies_dir: PathBuf,
    backups_dir: PathBuf,
    state_file: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let app_root = utils::resolve_base(root);
        ensure_dir(&app_root)?;
        let companies_dir = utils::companies_dir_in(&app_root);
        let backups_dir = utils::backups_dir_in(&app_root);
        ensure_dir(&companies_dir)?;
        ensure_dir(&backups_dir)?;
        let state_file = utils::state_file_in(&app_root);
        Ok(Self {
            root: app_root,
            companies_dir,
            backups_dir,
            state_file,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None, None)
    }

    pub fn company_path(&self, name: &str) -> PathBuf {
        self.companies_dir
            .join(format!("{}.json", canonical_name(name)))
    }

    fn backup_dir(&self, name: &str) -> PathBuf {
        self.backups_dir.join(canonical_name(name))
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    /// Name of the company opened last, if any.
    pub fn last_company(&self) -> Result<Option<String>> {
        let state = self.read_state()?;
        Ok(state.last_company)
    }

    pub fn record_last_company(&self, name: Option<&str>) -> Result<()> {
        let mut state = self.read_state()?;
        state.last_company = name.map(canonical_name);
        let data = serde_json::to_string_pretty(&state)?;
        utils::write_file(&self.state_file, &data)?;
        Ok(())
    }

    fn read_state(&self) -> Result<StoreState> {
        if self.state_file.exists() {
            let data = fs::read_to_string(&self.state_file)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(StoreState::default())
        }
    }

    fn write_backup_file(&self, books: &CompanyBooks, name: &str, note: Option<&str>) -> Result<()> {
        let dir = self.backup_dir(name);
        ensure_dir(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut file_stem = format!("{}_{}", canonical_name(name), timestamp);
        if let Some(label) = utils::sanitize_note(note) {
            file_stem.push('_');
            file_stem.push_str(&label);
        }
        let path = dir.join(format!("{}.{}", file_stem, BACKUP_EXTENSION));
        let json = serde_json::to_string_pretty(books)?;
        utils::write_file(&path, &json)?;
        self.prune_backups(name)?;
        Ok(())
    }

    fn backup_existing_file(&self, name: &str, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        let dir = self.backup_dir(name);
        ensure_dir(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let backup_name = format!("{}_{}.{}", canonical_name(name), timestamp, BACKUP_EXTENSION);
        let backup_path = dir.join(&backup_name);
        fs::copy(path, &backup_path)?;
        self.prune_backups(name)?;
        Ok(())
    }

    fn prune_backups(&self, name: &str) -> Result<()> {
        let backups = self.list_backups(name)?;
        if backups.len() <= self.retention {
            return Ok(());
        }
        for entry in backups.iter().skip(self.retention) {
            let path = self.backup_path(name, entry);
            let _ = fs::remove_file(path);
        }
        Ok(())
    }

    pub fn backup_path(&self, name: &str, backup_name: &str) -> PathBuf {
        self.backup_dir(name).join(backup_name)
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, books: &CompanyBooks, name: &str) -> Result<()> {
        let path = self.company_path(name);
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        if path.exists() {
            self.backup_existing_file(name, &path)?;
        }
        let json = serde_json::to_string_pretty(books)?;
        let tmp = utils::tmp_path(&path);
        utils::write_file(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn load(&self, name: &str) -> Result<CompanyBooks> {
        let path = self.company_path(name);
        load_books_from_path(&path)
    }

    fn list_backups(&self, name: &str) -> Result<Vec<String>> {
        let dir = self.backup_dir(name);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            let file_name = match path.file_name().and_then(|stem| stem.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };
            entries.push(file_name);
        }
        entries.sort_by(|a, b| {
            utils::parse_backup_timestamp(b).cmp(&utils::parse_backup_timestamp(a))
        });
        Ok(entries)
    }

    fn backup(&self, books: &CompanyBooks, name: &str, note: Option<&str>) -> Result<()> {
        self.write_backup_file(books, name, note)
    }

    fn restore(&self, name: &str, backup_name: &str) -> Result<CompanyBooks> {
        let backup_path = self.backup_path(name, backup_name);
        if !backup_path.exists() {
            return Err(BooksError::StorageError(format!(
                "backup `{}` not found",
                backup_name
            )));
        }
        let target = self.company_path(name);
        fs::copy(&backup_path, &target)?;
        load_books_from_path(&target)
    }
}

pub fn save_books_to_path(books: &CompanyBooks, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(books)?;
    let tmp = utils::tmp_path(path);
    utils::write_file(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_books_from_path(path: &Path) -> Result<CompanyBooks> {
    let data = fs::read_to_string(path)?;
    let books: CompanyBooks = serde_json::from_str(&data)?;
    Ok(books)
}

/// Referential sweep over one company's books; returns human-readable
/// warnings for dangling ids without failing the load.
pub fn books_warnings(books: &CompanyBooks) -> Vec<String> {
    let client_ids: HashSet<_> = books.clients.iter().map(|c| c.id).collect();
    let project_ids: HashSet<_> = books.projects.iter().map(|p| p.id).collect();
    let vendor_ids: HashSet<_> = books.vendors.iter().map(|v| v.id).collect();
    let mut warnings = Vec::new();

    for entry in &books.entries {
        if !project_ids.contains(&entry.project_id) {
            warnings.push(format!(
                "entry {} references unknown project {}",
                entry.id, entry.project_id
            ));
        }
        if let Some(vendor_id) = entry.vendor_id {
            if !vendor_ids.contains(&vendor_id) {
                warnings.push(format!(
                    "entry {} references unknown vendor {}",
                    entry.id, vendor_id
                ));
            }
        }
        if let Some(client_id) = entry.client_id {
            if !client_ids.contains(&client_id) {
                warnings.push(format!(
                    "entry {} references unknown client {}",
                    entry.id, client_id
                ));
            }
        }
    }
    for expense in &books.labor_expenses {
        if let Some(site_id) = expense.site_id {
            if !project_ids.contains(&site_id) {
                warnings.push(format!(
                    "labor expense {} references unknown site {}",
                    expense.id, site_id
                ));
            }
        }
        if let Some(vendor_id) = expense.vendor_id {
            if !vendor_ids.contains(&vendor_id) {
                warnings.push(format!(
                    "labor expense {} references unknown vendor {}",
                    expense.id, vendor_id
                ));
            }
        }
    }
    for payment in &books.labor_payments {
        if let Some(project_id) = payment.project_id {
            if !project_ids.contains(&project_id) {
                warnings.push(format!(
                    "labor payment {} references unknown project {}",
                    payment.id, project_id
                ));
            }
        }
        if let Some(client_id) = payment.client_id {
            if !client_ids.contains(&client_id) {
                warnings.push(format!(
                    "labor payment {} references unknown client {}",
                    payment.id, client_id
                ));
            }
        }
    }
    warnings
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    last_company: Option<String>,
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "company".into()
    } else {
        sanitized
    }
}
