use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

mod course_queries;
pub mod course_repository;
pub mod memory_repo;

pub mod queries {
    pub use super::course_queries::*;
}

pub use course_repository::{CoursePersister, PgCoursePersister};
pub use memory_repo::InMemoryCoursePersister;

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}
