mod create;
mod delete;
mod list;

use axum::{http::StatusCode, response::{IntoResponse, Response}, routing::{delete, get}, Json, Router};
use serde_json::Value;

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_contacts).post(create::create_contact))
        .route("/{id}", delete(delete::delete_contact))
}

fn bad_request(body: Value) -> Response {
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}
