//! Contact store subsystem
//!
//! The store holds the canonical persistent state of the address book:
//! an ordered, identity-unique collection of contacts, serialized as one
//! checksummed binary blob that is rewritten whole on every save.
//!
//! # Design Principles
//!
//! - Whole-file overwrite, atomically (temp + fsync + rename)
//! - Checksum-verified on every load
//! - Loaded fresh per operation, no shared in-memory instance
//! - Linear scans throughout; operations are bounded by collection size
//! - Single process, single writer
//!
//! # Invariants Enforced
//!
//! - Present ids are pairwise distinct
//! - The persistent id counter stays strictly above every present id
//! - Insertion order survives the persistence round-trip
//! - Corruption is surfaced, never repaired

mod checksum;
mod codec;
mod collection;
mod errors;

pub use checksum::compute_checksum;
pub use codec::{decode_store, encode_store};
pub use collection::ContactStore;
pub use errors::{StoreError, StoreResult};
