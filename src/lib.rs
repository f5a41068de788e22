// Library exports for testing and reusability

pub mod cache;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use error::{AppError, Result};

use cache::LevelCache;
use db::CoursePersister;
use services::course_builder::CourseBuilder;
use std::sync::Arc;

pub struct AppState {
    pub course_builder: CourseBuilder,
    pub persister: Arc<dyn CoursePersister>,
    pub cache: Option<Arc<dyn LevelCache>>,
}
