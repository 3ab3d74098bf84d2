use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ai::QTable;
use crate::checkpoint::metadata::{TableEntry, TableMetadata, FORMAT_VERSION};
use crate::error::CheckpointError;
use crate::game::Move;

#[derive(Serialize, Deserialize)]
struct TableFile {
    metadata: TableMetadata,
    entries: Vec<TableEntry>,
}

/// A table read back from disk.
#[derive(Debug)]
pub struct LoadedTable {
    pub table: QTable,
    pub metadata: TableMetadata,
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Write `table` as JSON. The file is written next to `path` first and then
/// renamed over it, so a crash never leaves a half-written table behind.
pub fn save_table(
    path: &Path,
    table: &QTable,
    metadata: &TableMetadata,
) -> Result<(), CheckpointError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut entries: Vec<TableEntry> = table
        .iter()
        .map(|(state, mv, value)| TableEntry {
            state: state.to_string(),
            row: mv.row,
            col: mv.col,
            value,
        })
        .collect();
    // Stable output for diffs.
    entries.sort_by(|a, b| (&a.state, a.row, a.col).cmp(&(&b.state, b.row, b.col)));

    let file = TableFile {
        metadata: metadata.clone(),
        entries,
    };
    let json = serde_json::to_string_pretty(&file)?;

    let tmp = tmp_path(path);
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;

    log::info!(
        "saved Q table ({} entries) to {}",
        metadata.entries,
        path.display()
    );
    Ok(())
}

/// Read a table written by [`save_table`].
pub fn load_table(path: &Path) -> Result<LoadedTable, CheckpointError> {
    let json = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CheckpointError::NotFound(path.to_path_buf()),
        _ => CheckpointError::Read {
            path: path.to_path_buf(),
            source: e,
        },
    })?;
    let file: TableFile = serde_json::from_str(&json).map_err(|e| CheckpointError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    if file.metadata.format_version != FORMAT_VERSION {
        return Err(CheckpointError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: file.metadata.format_version,
            expected: FORMAT_VERSION,
        });
    }

    let table: QTable = file
        .entries
        .into_iter()
        .map(|e| (e.state, Move::new(e.row, e.col), e.value))
        .collect();

    if table.len() != file.metadata.entries {
        log::warn!(
            "{}: metadata lists {} entries but file holds {}",
            path.display(),
            file.metadata.entries,
            table.len()
        );
    }
    log::info!(
        "loaded Q table ({} entries, {} episodes) from {}",
        table.len(),
        file.metadata.episodes_trained,
        path.display()
    );

    Ok(LoadedTable {
        table,
        metadata: file.metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::QLearningConfig;
    use crate::game::{GameState, Player};
    use tempfile::TempDir;

    fn sample_table() -> QTable {
        let key = GameState::initial().fingerprint();
        vec![
            (key.clone(), Move::new(2, 3), 0.5),
            (key, Move::new(3, 2), -0.25),
            ("other".to_string(), Move::new(7, 7), 1.0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("q_table.json");
        let table = sample_table();
        let meta = TableMetadata::new(Player::Light, 42, QLearningConfig::default(), &table);

        save_table(&path, &table, &meta).unwrap();
        assert!(path.exists());
        assert!(!tmp_path(&path).exists());

        let loaded = load_table(&path).unwrap();
        assert_eq!(loaded.table, table);
        assert_eq!(loaded.metadata.side, Player::Light);
        assert_eq!(loaded.metadata.episodes_trained, 42);
        assert_eq!(loaded.metadata.entries, 3);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("dir").join("t.json");
        let table = QTable::new();
        let meta = TableMetadata::new(Player::Dark, 0, QLearningConfig::default(), &table);
        save_table(&path, &table, &meta).unwrap();
        let loaded = load_table(&path).unwrap();
        assert!(loaded.table.is_empty());
    }

    #[test]
    fn test_overwrite_existing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("t.json");
        let empty = QTable::new();
        let meta = TableMetadata::new(Player::Dark, 1, QLearningConfig::default(), &empty);
        save_table(&path, &empty, &meta).unwrap();

        let table = sample_table();
        let meta = TableMetadata::new(Player::Dark, 2, QLearningConfig::default(), &table);
        save_table(&path, &table, &meta).unwrap();

        let loaded = load_table(&path).unwrap();
        assert_eq!(loaded.table.len(), 3);
        assert_eq!(loaded.metadata.episodes_trained, 2);
    }

    #[test]
    fn test_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = load_table(&tmp.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CheckpointError::NotFound(_)));
    }

    #[test]
    fn test_corrupt_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_table(&path).unwrap_err();
        assert!(matches!(err, CheckpointError::Parse { .. }));
    }

    #[test]
    fn test_unsupported_version() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("old.json");
        let table = QTable::new();
        let mut meta = TableMetadata::new(Player::Dark, 0, QLearningConfig::default(), &table);
        meta.format_version = FORMAT_VERSION + 1;
        save_table(&path, &table, &meta).unwrap();
        let err = load_table(&path).unwrap_err();
        assert!(matches!(
            err,
            CheckpointError::UnsupportedVersion { found, .. } if found == FORMAT_VERSION + 1
        ));
    }
}
