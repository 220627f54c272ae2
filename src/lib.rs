pub mod api;
pub mod appresult;
pub mod config;
pub mod contact;
pub mod form;
pub mod pages;
pub mod res;
pub mod store;
pub mod validation;
pub mod view;

use std::sync::Arc;

use axum::{extract::FromRef, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use appresult::{AppError, AppResult};
pub use config::Config;
pub use contact::{Contact, ContactInput, Field, SortKey, SortOrder};
pub use store::{ContactStore, SqliteStore, StoreError};

pub type DynStore = Arc<dyn ContactStore>;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub store: DynStore,
}

impl AppState {
    pub fn new(store: impl ContactStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/contacts", api::router())
        .merge(pages::router())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "Contact API Running"
}
