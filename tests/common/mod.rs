use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use contactbook::{
    app,
    store::{StoreError, StoreResult},
    AppState, Contact, ContactInput, ContactStore, SqliteStore,
};
use sqlx::sqlite::SqlitePoolOptions;
use time::OffsetDateTime;
use tokio::net::TcpListener;
use uuid::Uuid;

/// Serves `state` on an ephemeral port and returns the base URL.
pub async fn spawn(state: AppState) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.unwrap();
    });
    format!("http://{addr}")
}

pub async fn memory_state() -> AppState {
    let db_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let store = SqliteStore::new(db_pool);
    store.migrate().await.unwrap();
    AppState::new(store)
}

/// Client that leaves redirects to the test.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

/// Lists a fixed set of contacts and fails every write.
#[allow(dead_code)]
#[derive(Clone)]
pub struct FailingStore {
    contacts: Arc<Mutex<Vec<Contact>>>,
}

#[allow(dead_code)]
impl FailingStore {
    pub fn with(names: &[&str]) -> Self {
        let contacts = names
            .iter()
            .map(|name| Contact {
                id: Uuid::now_v7(),
                name: name.to_string(),
                email: format!("{}@x.com", name.to_lowercase()),
                phone: "5551234567".to_owned(),
                message: None,
                created_at: OffsetDateTime::now_utc(),
            })
            .collect();
        Self {
            contacts: Arc::new(Mutex::new(contacts)),
        }
    }

    pub fn first_id(&self) -> Uuid {
        self.contacts.lock().unwrap()[0].id
    }
}

#[async_trait]
impl ContactStore for FailingStore {
    async fn create(&self, _input: ContactInput) -> StoreResult<Contact> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn list(&self) -> StoreResult<Vec<Contact>> {
        Ok(self.contacts.lock().unwrap().clone())
    }

    async fn delete(&self, _id: Uuid) -> StoreResult<()> {
        Err(StoreError::Database(sqlx::Error::PoolTimedOut))
    }
}
