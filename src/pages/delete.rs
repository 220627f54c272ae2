use axum::{
    debug_handler,
    extract::{Path, State},
    response::Redirect,
    Form,
};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{view::ListQuery, AppState, DynStore, StoreError};

use super::Notice;

#[derive(Debug, Deserialize)]
pub(crate) struct DeleteForm {
    name: Option<String>,
    #[serde(flatten)]
    list: ListQuery,
}

#[debug_handler(state = AppState)]
pub(crate) async fn delete_contact(
    State(store): State<DynStore>,
    Path(id): Path<Uuid>,
    Form(DeleteForm { name, list }): Form<DeleteForm>,
) -> Redirect {
    let url = match store.delete(id).await {
        Ok(()) | Err(StoreError::NotFound(_)) => {
            info!(%id, "contact removed from form");
            Notice::Deleted.redirect_url(name.as_deref(), &list)
        }
        Err(e) => {
            warn!(%id, error = %e, "failed to delete contact");
            Notice::DeleteFailed.redirect_url(None, &list)
        }
    };

    Redirect::to(&url)
}
