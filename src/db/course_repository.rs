use crate::error::Result;
use crate::models::{CourseRecord, Locale, NewCourse, PlaceRecord, PlaceStop};
use async_trait::async_trait;
use uuid::Uuid;

/// Storage for locales, courses and their ordered places.
#[async_trait]
pub trait CoursePersister: Send + Sync {
    /// Insert or update the locale keyed by `name`.
    async fn upsert_locale(&self, name: &str, description: &str) -> Result<Locale>;

    async fn insert_course(&self, course: &NewCourse) -> Result<CourseRecord>;

    /// Store every stop of a course. All or nothing.
    async fn insert_places(&self, course_id: Uuid, stops: &[PlaceStop]) -> Result<Vec<PlaceRecord>>;

    /// Remove a course and its places. Deleting an unknown id is not an error.
    async fn delete_course(&self, course_id: Uuid) -> Result<()>;

    async fn health_check(&self) -> Result<()>;

    fn backend_name(&self) -> &'static str;
}

pub struct PgCoursePersister {
    pool: sqlx::PgPool,
}

impl PgCoursePersister {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &sqlx::PgPool {
        &self.pool
    }
}

#[async_trait]
impl CoursePersister for PgCoursePersister {
    async fn upsert_locale(&self, name: &str, description: &str) -> Result<Locale> {
        Ok(super::course_queries::upsert_locale(&self.pool, name, description).await?)
    }

    async fn insert_course(&self, course: &NewCourse) -> Result<CourseRecord> {
        Ok(super::course_queries::insert_course(&self.pool, course).await?)
    }

    async fn insert_places(&self, course_id: Uuid, stops: &[PlaceStop]) -> Result<Vec<PlaceRecord>> {
        Ok(super::course_queries::insert_places(&self.pool, course_id, stops).await?)
    }

    async fn delete_course(&self, course_id: Uuid) -> Result<()> {
        let deleted = super::course_queries::delete_course(&self.pool, course_id).await?;
        tracing::debug!(course_id = %course_id, deleted, "Deleted course");
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
