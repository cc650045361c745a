//! CLI command implementations
//!
//! Every command is one external store operation: load the store fresh
//! from disk, perform zero or one mutation, then either re-persist and
//! report, or report the unsaved candidate with its validation errors.
//! Nothing is cached between invocations; the durable file is the only
//! state carrier.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::contact::Contact;
use crate::observability::{log_event, Event};
use crate::store::{ContactStore, StoreError};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Name of the durable artifact inside `<data_dir>/data/`.
const STORE_FILE: &str = "contacts.dat";

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory (required)
    pub data_dir: String,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.data_dir.is_empty() {
            return Err(CliError::config_error("data_dir must not be empty"));
        }
        Ok(())
    }

    /// Path of the store file under the data directory.
    pub fn store_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join("data").join(STORE_FILE)
    }
}

/// Parse arguments and dispatch to the matching command.
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args())
}

/// Dispatch a parsed command.
pub fn run_command(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Init { config } => init(&config),
        Command::List { config } => list(&config),
        Command::Search { query, config } => search(&config, &query),
        Command::Show { id, config } => show(&config, id),
        Command::Add {
            name,
            email,
            config,
        } => add(&config, name, email),
        Command::Update {
            id,
            name,
            email,
            config,
        } => update(&config, id, name, email),
        Command::Remove { id, config } => remove(&config, id),
    }
}

/// Creates the data directory and an empty store file.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let store_path = config.store_path();

    if store_path.exists() {
        return Err(CliError::already_initialized(format!(
            "store file already exists: {}",
            store_path.display()
        )));
    }

    let data_dir = store_path
        .parent()
        .ok_or_else(|| CliError::config_error("data_dir has no parent directory"))?
        .to_path_buf();
    fs::create_dir_all(&data_dir).map_err(|e| {
        CliError::store_error(format!(
            "Failed to create data directory {}: {}",
            data_dir.display(),
            e
        ))
    })?;

    let store = ContactStore::new(&store_path);
    save_store(&store)?;

    log_event(
        Event::StoreCreated,
        &[("path", &store_path.display().to_string())],
    );
    Ok(())
}

/// Prints every contact in insertion order.
pub fn list(config_path: &Path) -> CliResult<()> {
    let store = load_store(config_path)?;
    for contact in &store {
        println!("{}", contact);
    }
    Ok(())
}

/// Prints every contact whose name contains the query.
pub fn search(config_path: &Path, query: &str) -> CliResult<()> {
    let store = load_store(config_path)?;
    for contact in store.search(query) {
        println!("{}", contact);
    }
    Ok(())
}

/// Prints one contact by id.
pub fn show(config_path: &Path, id: u64) -> CliResult<()> {
    let store = load_store(config_path)?;
    match store.find_by_id(id) {
        Some(contact) => {
            println!("{}", contact);
            Ok(())
        }
        None => Err(CliError::not_found(format!("no contact with id {}", id))),
    }
}

/// Validates a candidate contact, then appends and persists it.
///
/// Validation runs against the pre-mutation store. On failure nothing
/// is appended or saved; the candidate's errors are surfaced and the
/// invocation exits nonzero.
pub fn add(config_path: &Path, name: String, email: String) -> CliResult<()> {
    let mut store = load_store(config_path)?;

    let mut candidate = Contact::new(name, email);
    let result = candidate.validate(&store);
    if !result.is_ok() {
        log_event(
            Event::ValidationRejected,
            &[("email", &candidate.email), ("name", &candidate.name)],
        );
        return Err(CliError::invalid_contact(candidate.format_errors()));
    }

    let id = store.append(candidate);
    save_store(&store)?;

    log_event(Event::ContactAppended, &[("id", &id.to_string())]);
    println!("added contact {}", id);
    Ok(())
}

/// Edits an existing contact in place, re-validating before persisting.
///
/// The edited copy validates against the loaded store and relies on id
/// self-exclusion, so keeping the same email is never a collision.
pub fn update(
    config_path: &Path,
    id: u64,
    name: Option<String>,
    email: Option<String>,
) -> CliResult<()> {
    let mut store = load_store(config_path)?;

    let mut edited = store
        .find_by_id(id)
        .cloned()
        .ok_or_else(|| CliError::not_found(format!("no contact with id {}", id)))?;
    if let Some(name) = name {
        edited.name = name;
    }
    if let Some(email) = email {
        edited.email = email;
    }

    let result = edited.validate(&store);
    if !result.is_ok() {
        log_event(
            Event::ValidationRejected,
            &[("email", &edited.email), ("id", &id.to_string())],
        );
        return Err(CliError::invalid_contact(edited.format_errors()));
    }

    // find_by_id succeeded above, the slot is still there
    if let Some(slot) = store.find_by_id_mut(id) {
        *slot = edited;
    }
    save_store(&store)?;

    log_event(Event::ContactUpdated, &[("id", &id.to_string())]);
    println!("updated contact {}", id);
    Ok(())
}

/// Removes a contact by id and persists the shrunken store.
pub fn remove(config_path: &Path, id: u64) -> CliResult<()> {
    let mut store = load_store(config_path)?;

    let removed = store
        .remove(id)
        .map_err(|e| CliError::not_found(e.to_string()))?;
    save_store(&store)?;

    log_event(Event::ContactRemoved, &[("id", &id.to_string())]);
    println!("removed {}", removed);
    Ok(())
}

/// Loads the store named by the config, mapping store failures onto CLI
/// errors and emitting the matching events.
fn load_store(config_path: &Path) -> CliResult<ContactStore> {
    let config = Config::load(config_path)?;
    let store_path = config.store_path();

    match ContactStore::load(&store_path) {
        Ok(store) => {
            log_event(Event::StoreLoaded, &[("count", &store.len().to_string())]);
            Ok(store)
        }
        Err(StoreError::StorageUnavailable { path, source })
            if source.kind() == ErrorKind::NotFound =>
        {
            Err(CliError::not_initialized(format!(
                "no store at {}; run `cardfile init` first",
                path.display()
            )))
        }
        Err(err @ StoreError::CorruptData { .. }) => {
            if let StoreError::CorruptData { offset, reason } = &err {
                log_event(
                    Event::CorruptionDetected,
                    &[("offset", &offset.to_string()), ("reason", reason)],
                );
            }
            Err(CliError::store_error(err.to_string()))
        }
        Err(err) => Err(CliError::store_error(err.to_string())),
    }
}

/// Persists the store and emits the save event.
fn save_store(store: &ContactStore) -> CliResult<()> {
    store
        .save()
        .map_err(|e| CliError::store_error(e.to_string()))?;
    log_event(Event::StoreSaved, &[("count", &store.len().to_string())]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &Path) -> PathBuf {
        let config_path = dir.join("cardfile.json");
        let data_dir = dir.join("store");
        let body = serde_json::json!({ "data_dir": data_dir });
        fs::write(&config_path, body.to_string()).unwrap();
        config_path
    }

    #[test]
    fn test_config_load_and_store_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(temp_dir.path());

        let config = Config::load(&config_path).unwrap();
        assert!(config.store_path().ends_with("data/contacts.dat"));
    }

    #[test]
    fn test_config_rejects_empty_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("cardfile.json");
        fs::write(&config_path, r#"{"data_dir": ""}"#).unwrap();

        assert!(Config::load(&config_path).is_err());
    }

    #[test]
    fn test_config_rejects_bad_json() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("cardfile.json");
        fs::write(&config_path, "not json").unwrap();

        assert!(Config::load(&config_path).is_err());
    }

    #[test]
    fn test_init_creates_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(temp_dir.path());

        init(&config_path).unwrap();

        let config = Config::load(&config_path).unwrap();
        let store = ContactStore::load(config.store_path()).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.next_id(), 0);
    }

    #[test]
    fn test_init_twice_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(temp_dir.path());

        init(&config_path).unwrap();
        let err = init(&config_path).unwrap_err();
        assert_eq!(
            err.code(),
            super::super::errors::CliErrorCode::AlreadyInitialized
        );
    }

    #[test]
    fn test_add_then_show_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(temp_dir.path());
        init(&config_path).unwrap();

        add(&config_path, "alice".into(), "a@x.to".into()).unwrap();

        let config = Config::load(&config_path).unwrap();
        let store = ContactStore::load(config.store_path()).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.find_by_id(0).unwrap().name, "alice");
    }

    #[test]
    fn test_show_known_and_unknown_id() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(temp_dir.path());
        init(&config_path).unwrap();
        add(&config_path, "alice".into(), "a@x.to".into()).unwrap();

        show(&config_path, 0).unwrap();

        let err = show(&config_path, 7).unwrap_err();
        assert_eq!(err.code(), super::super::errors::CliErrorCode::NotFound);
        assert!(err.message().contains("no contact with id 7"));
    }

    #[test]
    fn test_add_duplicate_email_is_rejected_and_unsaved() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(temp_dir.path());
        init(&config_path).unwrap();

        add(&config_path, "alice".into(), "a@x.to".into()).unwrap();
        let err = add(&config_path, "dave".into(), "a@x.to".into()).unwrap_err();
        assert_eq!(
            err.code(),
            super::super::errors::CliErrorCode::InvalidContact
        );
        assert!(err.message().contains("already taken"));

        // The rejected candidate was never persisted.
        let config = Config::load(&config_path).unwrap();
        let store = ContactStore::load(config.store_path()).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_keeps_own_email_without_collision() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(temp_dir.path());
        init(&config_path).unwrap();
        add(&config_path, "alice".into(), "a@x.to".into()).unwrap();

        // Rename only; the unchanged email must not collide with itself.
        update(&config_path, 0, Some("alicia".into()), None).unwrap();

        let config = Config::load(&config_path).unwrap();
        let store = ContactStore::load(config.store_path()).unwrap();
        let contact = store.find_by_id(0).unwrap();
        assert_eq!(contact.name, "alicia");
        assert_eq!(contact.email, "a@x.to");
    }

    #[test]
    fn test_update_rejects_taking_anothers_email() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(temp_dir.path());
        init(&config_path).unwrap();
        add(&config_path, "alice".into(), "a@x.to".into()).unwrap();
        add(&config_path, "bob".into(), "b@x.to".into()).unwrap();

        let err = update(&config_path, 1, None, Some("a@x.to".into())).unwrap_err();
        assert_eq!(
            err.code(),
            super::super::errors::CliErrorCode::InvalidContact
        );

        // Bob is unchanged on disk.
        let config = Config::load(&config_path).unwrap();
        let store = ContactStore::load(config.store_path()).unwrap();
        assert_eq!(store.find_by_id(1).unwrap().email, "b@x.to");
    }

    #[test]
    fn test_remove_persists_and_rejects_unknown_id() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(temp_dir.path());
        init(&config_path).unwrap();
        add(&config_path, "alice".into(), "a@x.to".into()).unwrap();

        remove(&config_path, 0).unwrap();

        let config = Config::load(&config_path).unwrap();
        let store = ContactStore::load(config.store_path()).unwrap();
        assert!(store.is_empty());

        let err = remove(&config_path, 99).unwrap_err();
        assert_eq!(err.code(), super::super::errors::CliErrorCode::NotFound);
    }

    #[test]
    fn test_commands_require_init() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = write_config(temp_dir.path());

        let err = list(&config_path).unwrap_err();
        assert_eq!(
            err.code(),
            super::super::errors::CliErrorCode::NotInitialized
        );
    }
}
