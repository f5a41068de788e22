use crate::models::{PlaceCategory, ProjectedPoint};
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

/// One venue chosen by the sequencer, in course order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlaceStop {
    pub name: String,
    pub address: String,
    pub category: PlaceCategory,
    /// Provider's free-text category, kept for display
    pub category_label: String,
    pub description: String,
    pub link: String,
    pub sequence_order: u32,
    #[serde(flatten)]
    pub point: ProjectedPoint,
}

/// A course that has been planned but not yet stored.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CourseDraft {
    pub title: String,
    pub description: String,
    pub themes: Vec<String>,
    pub stops: Vec<PlaceStop>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Locale {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Course row fields supplied by the caller; id and timestamp come from storage.
#[derive(Debug, Clone)]
pub struct NewCourse {
    pub locale_id: Uuid,
    pub title: String,
    pub description: String,
    pub themes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CourseRecord {
    pub id: Uuid,
    pub locale_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub themes: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PlaceRecord {
    pub id: Uuid,
    pub course_id: Uuid,
    pub name: String,
    pub address: String,
    pub category: String,
    pub category_label: String,
    pub description: String,
    pub link: String,
    pub mapx: i64,
    pub mapy: i64,
    pub sequence_order: i32,
}

/// Travel between two consecutive stops.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CourseLeg {
    pub from_order: u32,
    pub to_order: u32,
    /// Great-circle distance
    pub distance_km: f64,
    pub estimated_minutes: u32,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseResponse {
    #[serde(flatten)]
    pub course: CourseRecord,
    pub places: Vec<PlaceRecord>,
    pub legs: Vec<CourseLeg>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub locale: Locale,
    pub courses: Vec<CourseResponse>,
}
