use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::credential::errors::StoreError;
use crate::credential::models::Credential;
use crate::credential::models::CredentialId;
use crate::credential::ports::CredentialStore;

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CredentialRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
}

impl From<CredentialRow> for Credential {
    fn from(row: CredentialRow) -> Self {
        Self {
            id: CredentialId(row.id),
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
        }
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Credential>, StoreError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT id, username, email, password_hash
            FROM credentials
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::ColumnNotFound(_) => {
                StoreError::MalformedRecord(e.to_string())
            }
            _ => StoreError::Unavailable(e.to_string()),
        })?;

        Ok(row.map(Credential::from))
    }
}
