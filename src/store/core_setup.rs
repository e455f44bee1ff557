use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{JsonMirror, MirrorError, Table, TableState, write_atomic};

const FILE_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct TableFile {
    version: u32,
    saved_at: String,
    rows: Vec<TableRow>,
}

#[derive(Serialize, Deserialize)]
struct TableRow {
    key: String,
    record: serde_json::Value,
}

impl JsonMirror {
    /// Opens (creating if needed) the mirror rooted at `dir` and loads every table file.
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir).with_context(|| format!("create mirror dir {}", dir.display()))?;

        let mut tables = BTreeMap::new();
        for table in Table::ALL {
            let rows = load_table(&dir.join(table.file_name()))
                .with_context(|| format!("load {} table", table))?;
            tables.insert(table, TableState { rows, dirty: false });
        }

        Ok(Self {
            root: dir.to_path_buf(),
            tables: Mutex::new(tables),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub(super) fn tables(&self) -> MutexGuard<'_, BTreeMap<Table, TableState>> {
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(super) fn flush(&self) -> Result<(), MirrorError> {
        let mut tables = self.tables();
        for (table, state) in tables.iter_mut().filter(|(_, s)| s.dirty) {
            let file = TableFile {
                version: FILE_VERSION,
                saved_at: now_rfc3339(),
                rows: state
                    .rows
                    .iter()
                    .map(|(key, record)| TableRow {
                        key: key.clone(),
                        record: record.clone(),
                    })
                    .collect(),
            };
            let bytes = serde_json::to_vec_pretty(&file)
                .map_err(|e| MirrorError::Io(format!("serialize {} table: {}", table, e)))?;
            write_atomic(&self.root.join(table.file_name()), &bytes)
                .map_err(|e| MirrorError::Io(format!("write {} table: {:#}", table, e)))?;
            state.dirty = false;
        }
        Ok(())
    }
}

fn load_table(path: &Path) -> Result<Vec<(String, serde_json::Value)>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let file: TableFile =
        serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))?;
    if file.version != FILE_VERSION {
        anyhow::bail!("unsupported mirror file version {}", file.version);
    }
    Ok(file.rows.into_iter().map(|r| (r.key, r.record)).collect())
}

fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "<unknown>".to_string())
}
