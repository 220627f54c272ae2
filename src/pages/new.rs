use axum::{
    debug_handler,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    form::FormState,
    validation::MESSAGE_MAX_LEN,
    view::ListQuery,
    AppResult, AppState, ContactInput, DynStore,
};

use super::{render, Notice};

/// The add form: contact fields plus the list view it was submitted from.
#[derive(Debug, Deserialize)]
pub(crate) struct NewContactForm {
    #[serde(flatten)]
    contact: ContactInput,
    #[serde(flatten)]
    list: ListQuery,
}

#[debug_handler(state = AppState)]
pub(crate) async fn new_contact(
    State(store): State<DynStore>,
    Form(NewContactForm { contact, list }): Form<NewContactForm>,
) -> AppResult<Response> {
    let mut form = FormState::from_input(contact);

    // values and errors go back to the user; nothing is stored
    let Some(input) = form.submit() else {
        let contacts = store.list().await?;
        return Ok((StatusCode::BAD_REQUEST, render(&contacts, &list, &form, None)).into_response());
    };

    if input.message.chars().count() > MESSAGE_MAX_LEN {
        let contacts = store.list().await?;
        return Ok((
            StatusCode::BAD_REQUEST,
            render(&contacts, &list, &form, Some(Notice::MessageTooLong.render(None))),
        )
            .into_response());
    }

    match store.create(input).await {
        Ok(contact) => {
            info!(id = %contact.id, "contact added from form");
            Ok(Redirect::to(&Notice::Created.redirect_url(Some(&contact.name), &list)).into_response())
        }
        Err(e) => {
            warn!(error = %e, "failed to add contact");
            let contacts = store.list().await?;
            Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                render(&contacts, &list, &form, Some(Notice::CreateFailed.render(None))),
            )
                .into_response())
        }
    }
}
