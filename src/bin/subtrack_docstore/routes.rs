//! Authenticated document routes.

use super::*;

pub(super) fn authed_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/collections/:collection/documents", get(list_documents))
        .route(
            "/collections/:collection/documents/:key",
            get(get_document).put(set_document).patch(update_field),
        )
        .layer(middleware::from_fn_with_state(state, require_bearer))
}
