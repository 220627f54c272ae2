use axum::{debug_handler, extract::State, Json};

use crate::{AppResult, AppState, Contact, DynStore};

#[debug_handler(state = AppState)]
pub(crate) async fn list_contacts(State(store): State<DynStore>) -> AppResult<Json<Vec<Contact>>> {
    Ok(Json(store.list().await?))
}
