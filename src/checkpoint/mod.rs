//! Q table persistence: JSON files with metadata, written atomically.

mod metadata;
mod store;

pub use metadata::{TableEntry, TableMetadata, FORMAT_VERSION};
pub use store::{load_table, save_table, LoadedTable};
