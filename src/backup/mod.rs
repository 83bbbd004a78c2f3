//! Local backup files
//!
//! Finds backups waiting in the backup directory and removes them once they
//! have been handed to remote storage.

mod cleanup;
mod locator;

pub use cleanup::remove_backup;
pub use locator::find_backups;
