use super::*;

pub(super) async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

pub(super) async fn require_bearer(
    State(state): State<Arc<AppState>>,
    req: axum::extract::Request,
    next: Next,
) -> Response {
    let Some(value) = req.headers().get(header::AUTHORIZATION) else {
        return unauthorized();
    };
    let Ok(value) = value.to_str() else {
        return unauthorized();
    };
    let Some(token) = value.strip_prefix("Bearer ") else {
        return unauthorized();
    };
    if token != state.token {
        return unauthorized();
    }
    next.run(req).await
}

pub(super) async fn list_documents(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
) -> Result<Json<Vec<DocumentEntry>>, Response> {
    validate_name("collection", &collection).map_err(bad_request)?;

    let collections = state.collections.read().await;
    let entries: Vec<DocumentEntry> = collections
        .get(&collection)
        .map(|docs| {
            docs.iter()
                .map(|(key, fields)| DocumentEntry {
                    key: key.clone(),
                    fields: fields.clone(),
                })
                .collect()
        })
        .unwrap_or_default();
    Ok(Json(entries))
}

pub(super) async fn get_document(
    State(state): State<Arc<AppState>>,
    Path((collection, key)): Path<(String, String)>,
) -> Result<Json<DocumentEntry>, Response> {
    validate_name("collection", &collection).map_err(bad_request)?;
    validate_name("key", &key).map_err(bad_request)?;

    let collections = state.collections.read().await;
    let Some(fields) = collections.get(&collection).and_then(|docs| docs.get(&key)) else {
        return Err(document_not_found(&collection, &key));
    };
    Ok(Json(DocumentEntry {
        key,
        fields: fields.clone(),
    }))
}

pub(super) async fn set_document(
    State(state): State<Arc<AppState>>,
    Path((collection, key)): Path<(String, String)>,
    Query(query): Query<SetQuery>,
    Json(incoming): Json<Document>,
) -> Result<Json<DocumentEntry>, Response> {
    validate_name("collection", &collection).map_err(bad_request)?;
    validate_name("key", &key).map_err(bad_request)?;

    let mut collections = state.collections.write().await;
    let docs = collections.entry(collection.clone()).or_default();

    let fields = match docs.get(&key) {
        Some(existing) if query.merge => {
            let mut merged = existing.clone();
            merge_documents(&mut merged, incoming);
            merged
        }
        _ => incoming,
    };

    persist_document(state.as_ref(), &collection, &key, &fields).map_err(internal_error)?;
    docs.insert(key.clone(), fields.clone());
    tracing::debug!(%collection, %key, merge = query.merge, "document set");

    Ok(Json(DocumentEntry { key, fields }))
}

pub(super) async fn update_field(
    State(state): State<Arc<AppState>>,
    Path((collection, key)): Path<(String, String)>,
    Json(patch): Json<PatchRequest>,
) -> Result<Json<DocumentEntry>, Response> {
    validate_name("collection", &collection).map_err(bad_request)?;
    validate_name("key", &key).map_err(bad_request)?;

    let mut collections = state.collections.write().await;
    let Some(existing) = collections.get_mut(&collection).and_then(|d| d.get_mut(&key)) else {
        return Err(document_not_found(&collection, &key));
    };

    let mut fields = existing.clone();
    apply_field_update(&mut fields, &patch.path, patch.op)
        .map_err(|e| bad_request(anyhow::Error::new(e)))?;

    persist_document(state.as_ref(), &collection, &key, &fields).map_err(internal_error)?;
    *existing = fields.clone();
    tracing::debug!(%collection, %key, path = %patch.path, "field updated");

    Ok(Json(DocumentEntry { key, fields }))
}
