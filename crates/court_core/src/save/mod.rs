// Session save/load
// Pretty JSON documents with versioning, migration and atomic file writes

pub mod error;
pub mod format;
pub mod manager;
pub mod migration;

pub use error::SaveError;
pub use format::SessionDocument;
pub use manager::SessionFiles;
pub use migration::{migrate_document, needs_migration};

pub const SAVE_VERSION: u32 = 1;
