//! Document store access for the energy monitor.
//!
//! - [`store`]: the [`DocumentStore`] trait, typed fetch helpers and an
//!   in-memory store
//! - [`firestore`]: Cloud Firestore REST client (feature `native-io`)
//! - [`local`]: JSON files on disk, one file per document

#[cfg(feature = "native-io")]
pub mod firestore;
pub mod local;
pub mod store;

#[cfg(feature = "native-io")]
pub use firestore::{FirestoreClient, FirestoreSettings};
pub use local::LocalStore;
pub use store::{get_typed, Collections, DocumentStore, MemoryStore};
