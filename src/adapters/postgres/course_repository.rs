//! PostgreSQL implementation of CourseRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::catalog::{Course, CourseModule};
use crate::domain::foundation::{CourseId, Timestamp};
use crate::ports::{CourseRepository, StorageError};

use super::storage_error;

pub struct PostgresCourseRepository {
    pool: PgPool,
}

impl PostgresCourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CourseRow {
    id: Uuid,
    title: String,
    description: String,
    modules: Json<Vec<CourseModule>>,
    is_free: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Course {
            id: CourseId::from_uuid(row.id),
            title: row.title,
            description: row.description,
            modules: row.modules.0,
            is_free: row.is_free,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        }
    }
}

#[async_trait]
impl CourseRepository for PostgresCourseRepository {
    async fn create(&self, course: &Course) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO courses (id, title, description, modules, is_free, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(course.id.as_uuid())
        .bind(&course.title)
        .bind(&course.description)
        .bind(Json(&course.modules))
        .bind(course.is_free)
        .bind(course.created_at.as_datetime())
        .bind(course.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("create course", e))?;

        Ok(())
    }

    async fn update(&self, course: &Course) -> Result<(), StorageError> {
        let result = sqlx::query(
            r#"
            UPDATE courses SET
                title = $2,
                description = $3,
                modules = $4,
                is_free = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(course.id.as_uuid())
        .bind(&course.title)
        .bind(&course.description)
        .bind(Json(&course.modules))
        .bind(course.is_free)
        .bind(course.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("update course", e))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(format!("course {}", course.id)));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, StorageError> {
        let row: Option<CourseRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, modules, is_free, created_at, updated_at
            FROM courses
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("find course", e))?;

        Ok(row.map(Course::from))
    }

    async fn list(&self) -> Result<Vec<Course>, StorageError> {
        let rows: Vec<CourseRow> = sqlx::query_as(
            r#"
            SELECT id, title, description, modules, is_free, created_at, updated_at
            FROM courses
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("list courses", e))?;

        Ok(rows.into_iter().map(Course::from).collect())
    }
}
