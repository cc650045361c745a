//! The contact collection and its persistence round-trip
//!
//! A `ContactStore` is an ordered sequence of contacts plus an explicit
//! handle on the durable file. It is constructed fresh for every
//! external operation by `load`, mutated at most once, then either
//! discarded or immediately re-persisted by `save`. There is no shared
//! in-memory instance; the file is the single source of truth between
//! operations.
//!
//! Persistence is whole-collection granularity: `save` encodes the full
//! sequence and atomically replaces the file (temp + fsync + rename), so
//! a reader never observes a half-written blob. Exactly one writer
//! process is assumed; concurrent external writers are last-writer-wins.
//!
//! Id assignment draws from a persistent monotonically increasing
//! counter stored in the blob header, so an id freed by `remove` is
//! never issued again.

use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::slice;

use super::codec;
use super::errors::{StoreError, StoreResult};
use crate::contact::Contact;

/// The ordered, identity-unique collection of contacts.
#[derive(Debug)]
pub struct ContactStore {
    /// Durable artifact location
    path: PathBuf,
    /// Next id to assign; strictly above every present id
    next_id: u64,
    /// Contacts in insertion order
    contacts: Vec<Contact>,
}

impl ContactStore {
    /// Creates an empty, unsaved store bound to the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            next_id: 0,
            contacts: Vec::new(),
        }
    }

    /// Loads the store from its durable file.
    ///
    /// # Errors
    ///
    /// - `StorageUnavailable` if the file is missing or unreadable
    /// - `CorruptData` if the blob cannot be decoded
    pub fn load(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        let blob = fs::read(&path).map_err(|e| StoreError::unavailable(&path, e))?;
        let (next_id, contacts) = codec::decode_store(&blob)?;

        Ok(Self {
            path,
            next_id,
            contacts,
        })
    }

    /// Serializes the full sequence and atomically replaces the file.
    ///
    /// The blob is written to a sibling temp file, fsynced, then renamed
    /// over the target.
    ///
    /// # Errors
    ///
    /// `StorageUnavailable` on any I/O failure; the previous blob is
    /// left intact in that case.
    pub fn save(&self) -> StoreResult<()> {
        let blob = codec::encode_store(self.next_id, &self.contacts);
        let tmp_path = self.path.with_extension("tmp");

        let mut file =
            File::create(&tmp_path).map_err(|e| StoreError::unavailable(&tmp_path, e))?;
        file.write_all(&blob)
            .map_err(|e| StoreError::unavailable(&tmp_path, e))?;
        // fsync before rename, otherwise the rename can land an empty file
        file.sync_all()
            .map_err(|e| StoreError::unavailable(&tmp_path, e))?;

        fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::unavailable(&self.path, e))?;

        Ok(())
    }

    /// Returns the durable file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the id the next `append` will assign.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Returns the first contact with the given id, if any.
    ///
    /// Linear scan; an absent id is not an error here, the caller
    /// decides.
    pub fn find_by_id(&self, id: u64) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == Some(id))
    }

    /// Mutable variant of `find_by_id`, for the edit-in-place path.
    pub fn find_by_id_mut(&mut self, id: u64) -> Option<&mut Contact> {
        self.contacts.iter_mut().find(|c| c.id == Some(id))
    }

    /// Returns every contact whose name contains the query, in original
    /// order.
    ///
    /// Case-sensitive substring match; the empty query matches all.
    /// Read-only, never persisted.
    pub fn search(&self, query: &str) -> Vec<&Contact> {
        self.contacts
            .iter()
            .filter(|c| c.name.contains(query))
            .collect()
    }

    /// Assigns the next id to the contact and appends it.
    ///
    /// Returns the assigned id. The caller is responsible for calling
    /// `save` afterward, and for validating the contact against the
    /// pre-mutation store before calling this.
    pub fn append(&mut self, mut contact: Contact) -> u64 {
        let id = self.next_id;
        contact.id = Some(id);
        self.next_id += 1;
        self.contacts.push(contact);
        id
    }

    /// Removes and returns the first contact with the given id.
    ///
    /// The caller is responsible for calling `save` afterward.
    ///
    /// # Errors
    ///
    /// `NotFound` if no contact carries the id.
    pub fn remove(&mut self, id: u64) -> StoreResult<Contact> {
        let pos = self
            .contacts
            .iter()
            .position(|c| c.id == Some(id))
            .ok_or(StoreError::NotFound { id })?;
        Ok(self.contacts.remove(pos))
    }

    /// Number of contacts in the store.
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Returns whether the store holds no contacts.
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Iterates the contacts in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, Contact> {
        self.contacts.iter()
    }
}

impl<'a> IntoIterator for &'a ContactStore {
    type Item = &'a Contact;
    type IntoIter = slice::Iter<'a, Contact>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for ContactStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, contact) in self.contacts.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", contact)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seeded_store(path: &Path) -> ContactStore {
        let mut store = ContactStore::new(path);
        store.append(Contact::new("alice", "a@x.to"));
        store.append(Contact::new("bob", "b@x.to"));
        store
    }

    #[test]
    fn test_append_assigns_sequential_ids() {
        let store = seeded_store(Path::new("unused.dat"));
        assert_eq!(store.find_by_id(0).unwrap().name, "alice");
        assert_eq!(store.find_by_id(1).unwrap().name, "bob");
        assert_eq!(store.next_id(), 2);
    }

    #[test]
    fn test_append_never_reuses_a_removed_id() {
        let mut store = seeded_store(Path::new("unused.dat"));
        store.remove(1).unwrap();

        let id = store.append(Contact::new("carol", "c@x.to"));
        assert_eq!(id, 2, "removed id 1 must not be reissued");
        assert!(store.find_by_id(1).is_none());
    }

    #[test]
    fn test_find_by_id_missing_is_none() {
        let store = seeded_store(Path::new("unused.dat"));
        assert!(store.find_by_id(99).is_none());
    }

    #[test]
    fn test_remove_returns_the_contact() {
        let mut store = seeded_store(Path::new("unused.dat"));

        let bob = store.remove(1).unwrap();
        assert_eq!(bob.name, "bob");
        assert_eq!(store.len(), 1);

        let err = store.remove(99).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { id: 99 }));
    }

    #[test]
    fn test_search_is_a_pure_filter() {
        let mut store = seeded_store(Path::new("unused.dat"));
        store.append(Contact::new("carol", "c@x.to"));

        let hits = store.search("a");
        let names: Vec<_> = hits.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["alice", "carol"]);

        // Empty query returns everything, original order.
        assert_eq!(store.search("").len(), 3);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_search_is_case_sensitive() {
        let store = seeded_store(Path::new("unused.dat"));
        assert!(store.search("Alice").is_empty());
        assert_eq!(store.search("alice").len(), 1);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("contacts.dat");

        let store = seeded_store(&path);
        store.save().unwrap();

        let loaded = ContactStore::load(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.next_id(), 2);
        assert_eq!(loaded.find_by_id(0).unwrap().email, "a@x.to");
        assert_eq!(loaded.find_by_id(1).unwrap().email, "b@x.to");
    }

    #[test]
    fn test_load_missing_file_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope.dat");

        let err = ContactStore::load(&path).unwrap_err();
        assert!(matches!(err, StoreError::StorageUnavailable { .. }));
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("contacts.dat");

        seeded_store(&path).save().unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_save_into_missing_directory_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("no-such-dir").join("contacts.dat");

        let err = seeded_store(&path).save().unwrap_err();
        assert!(matches!(err, StoreError::StorageUnavailable { .. }));
    }

    #[test]
    fn test_display_lists_contacts_in_order() {
        let store = seeded_store(Path::new("unused.dat"));
        assert_eq!(store.to_string(), "[0] alice <a@x.to>\n[1] bob <b@x.to>");
    }
}
