use super::{JsonMirror, MirrorError, MirrorRecord, MirrorStore, QueryOrder, Table};

fn encode<T: MirrorRecord>(record: &T) -> Result<serde_json::Value, MirrorError> {
    serde_json::to_value(record).map_err(|e| MirrorError::Io(format!("encode {}: {}", T::TABLE, e)))
}

impl MirrorStore for JsonMirror {
    fn query<T: MirrorRecord>(&self, order: QueryOrder) -> Result<Vec<T>, MirrorError> {
        let tables = self.tables();
        let Some(state) = tables.get(&T::TABLE) else {
            return Ok(Vec::new());
        };

        let mut rows: Vec<&(String, serde_json::Value)> = state.rows.iter().collect();
        if order == QueryOrder::ByKey {
            rows.sort_by(|a, b| a.0.cmp(&b.0));
        }

        rows.into_iter()
            .map(|(key, value)| {
                serde_json::from_value::<T>(value.clone()).map_err(|e| MirrorError::Corrupt {
                    table: T::TABLE,
                    key: key.clone(),
                    message: e.to_string(),
                })
            })
            .collect()
    }

    fn insert<T: MirrorRecord>(&self, record: T) -> Result<(), MirrorError> {
        let value = encode(&record)?;
        let mut tables = self.tables();
        let state = tables.entry(T::TABLE).or_default();
        if state.rows.iter().any(|(k, _)| k == record.key()) {
            return Err(MirrorError::DuplicateKey {
                table: T::TABLE,
                key: record.key().to_string(),
            });
        }
        state.rows.push((record.key().to_string(), value));
        state.dirty = true;
        Ok(())
    }

    fn update<T: MirrorRecord>(&self, record: T) -> Result<(), MirrorError> {
        let value = encode(&record)?;
        let mut tables = self.tables();
        let state = tables.entry(T::TABLE).or_default();
        let Some(slot) = state.rows.iter_mut().find(|(k, _)| k == record.key()) else {
            return Err(missing(T::TABLE, record.key()));
        };
        slot.1 = value;
        state.dirty = true;
        Ok(())
    }

    fn delete<T: MirrorRecord>(&self, key: &str) -> Result<(), MirrorError> {
        let mut tables = self.tables();
        let state = tables.entry(T::TABLE).or_default();
        let Some(idx) = state.rows.iter().position(|(k, _)| k == key) else {
            return Err(missing(T::TABLE, key));
        };
        state.rows.remove(idx);
        state.dirty = true;
        Ok(())
    }

    fn delete_all<T: MirrorRecord>(&self) -> Result<usize, MirrorError> {
        let mut tables = self.tables();
        let state = tables.entry(T::TABLE).or_default();
        let removed = state.rows.len();
        if removed > 0 {
            state.rows.clear();
            state.dirty = true;
        }
        Ok(removed)
    }

    fn save(&self) -> Result<(), MirrorError> {
        self.flush()
    }
}

fn missing(table: Table, key: &str) -> MirrorError {
    MirrorError::Missing {
        table,
        key: key.to_string(),
    }
}

#[cfg(test)]
#[path = "../tests/store/table_crud_tests.rs"]
mod tests;
