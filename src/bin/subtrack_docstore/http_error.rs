use super::*;

fn error_body(status: StatusCode, message: String) -> Response {
    (status, Json(serde_json::json!({"error": message}))).into_response()
}

pub(super) fn unauthorized() -> Response {
    error_body(
        StatusCode::UNAUTHORIZED,
        "missing or invalid bearer token".to_string(),
    )
}

pub(super) fn internal_error(err: anyhow::Error) -> Response {
    tracing::error!(error = %format!("{:#}", err), "request failed");
    error_body(StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", err))
}

pub(super) fn bad_request(err: anyhow::Error) -> Response {
    error_body(StatusCode::BAD_REQUEST, format!("{:#}", err))
}

pub(super) fn document_not_found(collection: &str, key: &str) -> Response {
    error_body(
        StatusCode::NOT_FOUND,
        format!("no document {:?} in collection {:?}", key, collection),
    )
}
