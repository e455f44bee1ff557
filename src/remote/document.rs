use serde_json::Value;

use super::{Document, FieldPath, FieldUpdate};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("field path must have at least one segment")]
pub struct InvalidFieldPath;

/// Merges `incoming` into `target`. Nested maps merge key by key; any other value replaces.
pub fn merge_documents(target: &mut Document, incoming: Document) {
    for (key, value) in incoming {
        match (target.get_mut(&key), value) {
            (Some(Value::Object(existing)), Value::Object(nested)) => {
                merge_documents(existing, nested);
            }
            (_, value) => {
                target.insert(key, value);
            }
        }
    }
}

/// Applies a single field update. `Set` creates missing intermediate maps; `Delete` of an
/// absent field is a no-op.
pub fn apply_field_update(
    doc: &mut Document,
    path: &FieldPath,
    update: FieldUpdate,
) -> Result<(), InvalidFieldPath> {
    let Some((leaf, parents)) = path.segments().split_last() else {
        return Err(InvalidFieldPath);
    };

    match update {
        FieldUpdate::Set(value) => {
            let mut cursor = doc;
            for segment in parents {
                if !matches!(cursor.get(segment), Some(Value::Object(_))) {
                    cursor.insert(segment.clone(), Value::Object(Document::new()));
                }
                let Some(Value::Object(next)) = cursor.get_mut(segment) else {
                    return Err(InvalidFieldPath);
                };
                cursor = next;
            }
            cursor.insert(leaf.clone(), value);
        }
        FieldUpdate::Delete => {
            let mut cursor = doc;
            for segment in parents {
                match cursor.get_mut(segment) {
                    Some(Value::Object(next)) => cursor = next,
                    _ => return Ok(()),
                }
            }
            cursor.remove(leaf);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/remote/document_tests.rs"]
mod tests;
