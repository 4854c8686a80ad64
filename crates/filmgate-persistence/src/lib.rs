//! Persistence layer for Filmgate.
//!
//! Records are stored as JSON snapshots written atomically (write to a temp
//! file, then rename), so a reader always observes either the previous or
//! the new snapshot and never a partial write.
//!
//! # Example
//!
//! ```no_run
//! use filmgate_models::{ContentItem, ContentKind};
//! use filmgate_persistence::ContentStore;
//!
//! let store = ContentStore::new("/home/user/.filmgate");
//!
//! let item = ContentItem::new("film042", "BAADxyz", ContentKind::Video, "FILM042", "FILM042");
//! store.upsert(item).unwrap();
//!
//! let loaded = store.get("film042").unwrap();
//! ```

pub mod atomic;
pub mod content_store;
pub mod error;
pub mod user_store;

pub use content_store::ContentStore;
pub use error::{PersistenceError, Result};
pub use user_store::UserStore;
