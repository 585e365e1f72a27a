//! PostgreSQL implementation of UserRepository.
//!
//! The enrollment list is stored as a JSONB column on the user row and is
//! rewritten together with the rest of the document on every update.
//! Updates use optimistic locking on the `version` column.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::{Email, User};
use crate::domain::enrollment::{Enrollment, Enrollments};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::{StorageError, UserRepository};

use super::{is_unique_violation, storage_error};

const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    name: String,
    picture: Option<String>,
    mobile: Option<String>,
    external_id: Option<String>,
    password_hash: Option<String>,
    is_admin: bool,
    enrollments: Json<Vec<Enrollment>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    version: i64,
}

impl TryFrom<UserRow> for User {
    type Error = StorageError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email)
            .map_err(|e| StorageError::corrupt(format!("user {}: {}", row.id, e)))?;

        Ok(User {
            id: UserId::from_uuid(row.id),
            email,
            name: row.name,
            picture: row.picture,
            mobile: row.mobile,
            external_id: row.external_id,
            password_hash: row.password_hash,
            is_admin: row.is_admin,
            enrollments: Enrollments::from(row.enrollments.0),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
            version: row.version,
        })
    }
}

const SELECT_COLUMNS: &str = "SELECT id, email, name, picture, mobile, external_id, password_hash, \
     is_admin, enrollments, created_at, updated_at, version FROM users";

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: &User) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, email, name, picture, mobile, external_id, password_hash,
                is_admin, enrollments, created_at, updated_at, version
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.email.as_str())
        .bind(&user.name)
        .bind(&user.picture)
        .bind(&user.mobile)
        .bind(&user.external_id)
        .bind(&user.password_hash)
        .bind(user.is_admin)
        .bind(Json(user.enrollments.as_slice()))
        .bind(user.created_at.as_datetime())
        .bind(user.updated_at.as_datetime())
        .bind(user.version)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e, EMAIL_UNIQUE_CONSTRAINT) {
                return StorageError::Duplicate(format!("email {}", user.email));
            }
            storage_error("create user", e)
        })?;

        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), StorageError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                email = $2,
                name = $3,
                picture = $4,
                mobile = $5,
                external_id = $6,
                password_hash = $7,
                is_admin = $8,
                enrollments = $9,
                updated_at = $10,
                version = version + 1
            WHERE id = $1 AND version = $11
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.email.as_str())
        .bind(&user.name)
        .bind(&user.picture)
        .bind(&user.mobile)
        .bind(&user.external_id)
        .bind(&user.password_hash)
        .bind(user.is_admin)
        .bind(Json(user.enrollments.as_slice()))
        .bind(user.updated_at.as_datetime())
        .bind(user.version)
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("update user", e))?;

        if result.rows_affected() == 0 {
            let exists =
                sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                    .bind(user.id.as_uuid())
                    .fetch_one(&self.pool)
                    .await
                    .map_err(|e| storage_error("update user", e))?;

            if exists {
                return Err(StorageError::Conflict(format!(
                    "user {} changed since version {}",
                    user.id, user.version
                )));
            }
            return Err(StorageError::NotFound(format!("user {}", user.id)));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StorageError> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("find user", e))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, StorageError> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{} WHERE email = $1", SELECT_COLUMNS))
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("find user by email", e))?;

        row.map(User::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<User>, StorageError> {
        let rows: Vec<UserRow> =
            sqlx::query_as(&format!("{} ORDER BY created_at ASC", SELECT_COLUMNS))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| storage_error("list users", e))?;

        rows.into_iter().map(User::try_from).collect()
    }
}
