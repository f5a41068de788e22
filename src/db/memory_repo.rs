use super::course_repository::CoursePersister;
use crate::error::Result;
use crate::models::{CourseRecord, Locale, NewCourse, PlaceRecord, PlaceStop};
use async_trait::async_trait;
use std::collections::HashMap;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct MemoryState {
    locales: HashMap<String, Locale>,
    courses: HashMap<Uuid, CourseRecord>,
    places: HashMap<Uuid, Vec<PlaceRecord>>,
}

/// Process-local store used when no database is configured, and in tests.
#[derive(Default)]
pub struct InMemoryCoursePersister {
    state: RwLock<MemoryState>,
}

impl InMemoryCoursePersister {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn course_count(&self) -> usize {
        self.state.read().await.courses.len()
    }

    pub async fn locale(&self, name: &str) -> Option<Locale> {
        self.state.read().await.locales.get(name).cloned()
    }

    pub async fn places(&self, course_id: Uuid) -> Vec<PlaceRecord> {
        self.state
            .read()
            .await
            .places
            .get(&course_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl CoursePersister for InMemoryCoursePersister {
    async fn upsert_locale(&self, name: &str, description: &str) -> Result<Locale> {
        let mut state = self.state.write().await;
        let locale = state
            .locales
            .entry(name.to_string())
            .and_modify(|l| l.description = Some(description.to_string()))
            .or_insert_with(|| Locale {
                id: Uuid::new_v4(),
                name: name.to_string(),
                description: Some(description.to_string()),
                created_at: OffsetDateTime::now_utc(),
            });
        Ok(locale.clone())
    }

    async fn insert_course(&self, course: &NewCourse) -> Result<CourseRecord> {
        let record = CourseRecord {
            id: Uuid::new_v4(),
            locale_id: course.locale_id,
            title: course.title.clone(),
            description: Some(course.description.clone()),
            themes: course.themes.clone(),
            created_at: OffsetDateTime::now_utc(),
        };
        self.state
            .write()
            .await
            .courses
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn insert_places(&self, course_id: Uuid, stops: &[PlaceStop]) -> Result<Vec<PlaceRecord>> {
        let records: Vec<PlaceRecord> = stops
            .iter()
            .map(|stop| PlaceRecord {
                id: Uuid::new_v4(),
                course_id,
                name: stop.name.clone(),
                address: stop.address.clone(),
                category: stop.category.to_string(),
                category_label: stop.category_label.clone(),
                description: stop.description.clone(),
                link: stop.link.clone(),
                mapx: stop.point.x,
                mapy: stop.point.y,
                sequence_order: stop.sequence_order as i32,
            })
            .collect();
        self.state
            .write()
            .await
            .places
            .insert(course_id, records.clone());
        Ok(records)
    }

    async fn delete_course(&self, course_id: Uuid) -> Result<()> {
        let mut state = self.state.write().await;
        state.courses.remove(&course_id);
        state.places.remove(&course_id);
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
