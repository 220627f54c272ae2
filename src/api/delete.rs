use axum::{debug_handler, extract::{Path, State}, Json};
use serde_json::{json, Value};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{AppResult, AppState, DynStore, StoreError};

// A missing id still answers 200; deleting is idempotent from the client's view.
#[debug_handler(state = AppState)]
pub(crate) async fn delete_contact(
    State(store): State<DynStore>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    match store.delete(id).await {
        Ok(()) => info!(%id, "contact deleted"),
        Err(StoreError::NotFound(_)) => debug!(%id, "contact already gone"),
        Err(e) => return Err(e.into()),
    }

    Ok(Json(json!({ "success": true, "message": "Contact deleted" })))
}
