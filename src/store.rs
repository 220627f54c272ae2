//! Contact persistence.

use async_trait::async_trait;
use sqlx::SqlitePool;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::contact::{Contact, ContactInput};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Contact not found: {0}")]
    NotFound(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Corrupt contact row: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Where contacts live. Last write wins; there is no update.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Stores a new contact, assigning its id and creation time.
    async fn create(&self, input: ContactInput) -> StoreResult<Contact>;

    /// All contacts, newest first.
    async fn list(&self) -> StoreResult<Vec<Contact>>;

    async fn delete(&self, id: Uuid) -> StoreResult<()>;
}

#[derive(Clone)]
pub struct SqliteStore {
    db_pool: SqlitePool,
}

type ContactRow = (String, String, String, String, Option<String>, i64);

impl SqliteStore {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self { db_pool }
    }

    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS contacts (
                id TEXT PRIMARY KEY NOT NULL,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone TEXT NOT NULL,
                message TEXT,
                created_at INTEGER NOT NULL
            )",
        )
        .execute(&self.db_pool)
        .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS contacts_created_at ON contacts (created_at)")
            .execute(&self.db_pool)
            .await?;
        Ok(())
    }
}

fn now_millis() -> (OffsetDateTime, i64) {
    let millis = (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64;
    (from_millis(millis), millis)
}

fn from_millis(millis: i64) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp_nanos(millis as i128 * 1_000_000)
        .unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

fn row_to_contact((id, name, email, phone, message, created_at): ContactRow) -> StoreResult<Contact> {
    Ok(Contact {
        id: Uuid::parse_str(&id).map_err(|e| StoreError::Corrupt(format!("{id}: {e}")))?,
        name,
        email,
        phone,
        message,
        created_at: from_millis(created_at),
    })
}

#[async_trait]
impl ContactStore for SqliteStore {
    async fn create(&self, input: ContactInput) -> StoreResult<Contact> {
        let input = input.trimmed();
        let id = Uuid::now_v7();
        let (created_at, millis) = now_millis();
        let message = Some(input.message).filter(|m| !m.is_empty());

        sqlx::query("INSERT INTO contacts (id,name,email,phone,message,created_at) VALUES (?,?,?,?,?,?)")
            .bind(id.to_string())
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(message.as_deref())
            .bind(millis)
            .execute(&self.db_pool)
            .await?;

        Ok(Contact {
            id,
            name: input.name,
            email: input.email,
            phone: input.phone,
            message,
            created_at,
        })
    }

    async fn list(&self) -> StoreResult<Vec<Contact>> {
        let rows: Vec<ContactRow> = sqlx::query_as(
            "SELECT id,name,email,phone,message,created_at FROM contacts ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.db_pool)
        .await?;

        rows.into_iter().map(row_to_contact).collect()
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM contacts WHERE id=?")
            .bind(id.to_string())
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
