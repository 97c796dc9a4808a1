use chrono::NaiveDate;
use sitebook_core::{
    domain::{Client, CompanyBooks, EntryKind, LedgerEntry, Project},
    storage::{JsonStorage, StorageBackend},
};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn sample_entry(books: &mut CompanyBooks, amount: f64) {
    let client_id = books.add_client(Client::new("Mr. Rao"));
    let project_id = books.add_project(Project::new("Rao Villa", client_id));
    books.add_entry(LedgerEntry::new(
        EntryKind::Credit,
        amount,
        "Advance",
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        project_id,
    ));
}

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}

#[test]
fn save_load_preserves_collections() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf()), Some(3)).unwrap();

    let mut books = CompanyBooks::new("Acme Constructions");
    sample_entry(&mut books, 42.0);
    storage.save(&books, "acme").expect("save books");

    let loaded = storage.load("acme").expect("load books");
    assert_eq!(loaded.entry_count(), 1);
    assert_eq!(loaded.entries[0].amount, 42.0);
    assert_eq!(loaded.projects.len(), 1);
    assert_eq!(loaded.clients.len(), 1);
}

#[test]
fn atomic_save_failure_preserves_original_file() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf()), Some(2)).unwrap();

    let mut books = CompanyBooks::new("Reliable");
    sample_entry(&mut books, 42.0);
    storage.save(&books, "reliable").expect("initial save");

    let path = storage.company_path("reliable");
    let original = fs::read_to_string(&path).expect("read original file");

    // Create a directory that collides with the temp file name to force the
    // write to fail mid-save.
    let tmp_path = tmp_path_for(&path);
    fs::create_dir_all(&tmp_path).unwrap();

    sample_entry(&mut books, 99.0);
    let result = storage.save(&books, "reliable");
    assert!(
        result.is_err(),
        "expected save to fail when temp path is a directory"
    );

    let current = fs::read_to_string(&path).expect("read after failure");
    assert_eq!(
        current, original,
        "atomic save failure must not corrupt the original file"
    );
}

#[test]
fn restore_brings_back_backed_up_state() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf()), Some(3)).unwrap();

    let mut books = CompanyBooks::new("Acme");
    storage.save(&books, "acme").unwrap();
    storage.backup(&books, "acme", Some("before entries")).unwrap();

    sample_entry(&mut books, 1_000.0);
    storage.save(&books, "acme").unwrap();
    assert_eq!(storage.load("acme").unwrap().entry_count(), 1);

    let backups = storage.list_backups("acme").unwrap();
    let labeled = backups
        .iter()
        .find(|name| name.contains("before-entries"))
        .expect("labeled backup present");
    let restored = storage.restore("acme", labeled).unwrap();
    assert_eq!(restored.entry_count(), 0);
}

#[test]
fn retention_prunes_old_backups() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf()), Some(2)).unwrap();

    let books = CompanyBooks::new("Acme");
    for note in ["one", "two", "three", "four"] {
        storage.backup(&books, "acme", Some(note)).unwrap();
    }

    let backups = storage.list_backups("acme").unwrap();
    assert!(
        backups.len() <= 2,
        "retention of 2 must cap backups, got {}",
        backups.len()
    );
}

#[test]
fn schema_version_defaults_on_older_files() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf()), None).unwrap();

    let books = CompanyBooks::new("Acme");
    let mut value = serde_json::to_value(&books).unwrap();
    value.as_object_mut().unwrap().remove("schema_version");
    let path = storage.company_path("acme");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();

    let loaded = storage.load("acme").unwrap();
    assert_eq!(loaded.schema_version, CompanyBooks::schema_version_default());
}
