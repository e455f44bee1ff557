use super::*;

/// Collection names and keys become path components on disk.
pub(super) fn validate_name(kind: &str, name: &str) -> Result<()> {
    if name.is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control)
    {
        anyhow::bail!("invalid {} {:?}", kind, name);
    }
    Ok(())
}

pub(super) fn document_path(state: &AppState, collection: &str, key: &str) -> PathBuf {
    state
        .data_dir
        .join(collection)
        .join(format!("{}.json", key))
}

pub(super) fn persist_document(
    state: &AppState,
    collection: &str,
    key: &str,
    fields: &Document,
) -> Result<()> {
    let entry = DocumentEntry {
        key: key.to_string(),
        fields: fields.clone(),
    };
    let bytes = serde_json::to_vec_pretty(&entry).context("serialize document")?;
    let path = document_path(state, collection, key);
    subtrack::store::write_atomic(&path, &bytes)
        .with_context(|| format!("persist {}/{}", collection, key))
}

pub(super) fn load_collections_from_disk(data_dir: &std::path::Path) -> Result<Collections> {
    let mut out = Collections::new();
    if !data_dir.is_dir() {
        return Ok(out);
    }

    for entry in std::fs::read_dir(data_dir).context("read data dir")? {
        let entry = entry.context("read data dir entry")?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let collection = entry
            .file_name()
            .into_string()
            .map_err(|_| anyhow::anyhow!("non-utf8 collection dir name"))?;

        let docs = out.entry(collection.clone()).or_default();
        for file in std::fs::read_dir(&path).with_context(|| format!("read {}", path.display()))? {
            let file = file.context("read collection entry")?.path();
            if file.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let bytes = std::fs::read(&file).with_context(|| format!("read {}", file.display()))?;
            let doc: DocumentEntry = serde_json::from_slice(&bytes)
                .with_context(|| format!("parse {}", file.display()))?;
            docs.insert(doc.key, doc.fields);
        }
    }

    Ok(out)
}

/// Seed file layout: `{"<collection>": {"<key>": {..fields..}}}`.
pub(super) fn read_seed(path: &std::path::Path) -> Result<Collections> {
    let bytes = std::fs::read(path).with_context(|| format!("read seed {}", path.display()))?;
    let seed: Collections =
        serde_json::from_slice(&bytes).with_context(|| format!("parse seed {}", path.display()))?;
    for (collection, docs) in &seed {
        validate_name("collection", collection)?;
        for key in docs.keys() {
            validate_name("key", key)?;
        }
    }
    Ok(seed)
}

/// Adds seeded documents that are not stored yet, persisting each. Returns how many were added.
pub(super) fn apply_seed(state: &AppState, collections: &mut Collections, seed: Collections) -> Result<usize> {
    let mut added = 0;
    for (collection, docs) in seed {
        let stored = collections.entry(collection.clone()).or_default();
        for (key, fields) in docs {
            if stored.contains_key(&key) {
                continue;
            }
            persist_document(state, &collection, &key, &fields)?;
            stored.insert(key, fields);
            added += 1;
        }
    }
    Ok(added)
}
