use axum::{debug_handler, extract::State, http::StatusCode, response::{IntoResponse, Response}, Json};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{
    validation::{self, MESSAGE_MAX_LEN},
    AppResult, AppState, ContactInput, DynStore,
};

use super::bad_request;

#[derive(Debug, Deserialize)]
pub(crate) struct CreateContactBody {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    message: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[debug_handler(state = AppState)]
pub(crate) async fn create_contact(
    State(store): State<DynStore>,
    Json(CreateContactBody { name, email, phone, message }): Json<CreateContactBody>,
) -> AppResult<Response> {
    let (Some(name), Some(email), Some(phone)) = (present(name), present(email), present(phone)) else {
        return Ok(bad_request(json!({ "message": "All required fields missing" })));
    };

    let input = ContactInput {
        name,
        email,
        phone,
        message: message.unwrap_or_default(),
    };

    let errors = validation::validate(&input);
    if !validation::is_valid(&errors) {
        return Ok(bad_request(json!({ "message": "Validation failed", "errors": errors })));
    }
    if input.message.chars().count() > MESSAGE_MAX_LEN {
        return Ok(bad_request(json!({ "message": "Message must be less than 1000 characters" })));
    }

    let contact = store.create(input).await?;
    info!(id = %contact.id, "contact created");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "contact": contact })),
    )
        .into_response())
}
