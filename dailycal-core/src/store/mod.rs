//! Session state and its persistence.
//!
//! [`Store`] is the one place that mutates [`AppData`](crate::models::AppData).
//! After each change the whole document is serialized to JSON and written to
//! a [`BlobStore`]:
//! - [`FileBlobStore`]: `calorie-companion-data.json` in the data directory
//! - [`MemoryBlobStore`]: kept in process, used by tests

mod blob;
mod controller;

pub use blob::{BlobError, BlobStore, FileBlobStore, MemoryBlobStore, DATA_KEY};
pub use controller::{LogoutPolicy, Store, StoreError};
