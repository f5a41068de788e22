use datecourse::db::InMemoryCoursePersister;
use datecourse::models::{Preferences, Theme, TransportMode};
use datecourse::services::course_builder::SortMode;
use datecourse::AppError;
use std::collections::HashSet;
use std::sync::atomic::Ordering;
use std::sync::Arc;

mod common;

#[tokio::test]
async fn test_builds_and_stores_course() {
    let gateway = Arc::new(common::seongsu_gateway());
    let builder = common::course_builder(gateway.clone());
    let persister = InMemoryCoursePersister::new();

    let prefs = Preferences {
        theme: Some(Theme::Insta),
        companion: Some("연인".to_string()),
        ..Preferences::new("성수동")
    };

    let response = builder.build_course(prefs, &persister).await.unwrap();

    // Smart level already returned seven listings
    assert_eq!(gateway.calls().len(), 3);

    assert_eq!(response.locale.name, "성수동");
    assert_eq!(
        response.locale.description.as_deref(),
        Some("AI Recommended course for 성수동")
    );
    assert_eq!(response.courses.len(), 1);

    let course = &response.courses[0];
    assert_eq!(course.course.title, "성수동 ✨ 인스타 핫플 코스");
    assert_eq!(
        course.course.description.as_deref(),
        Some("🏷️ 인스타 · 👫 연인")
    );
    assert_eq!(course.places.len(), 6);
    assert_eq!(course.legs.len(), 5);

    let orders: Vec<i32> = course.places.iter().map(|p| p.sequence_order).collect();
    assert_eq!(orders, vec![0, 1, 2, 3, 4, 5]);

    let names: HashSet<&str> = course.places.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names.len(), 6);
    assert!(course.places.iter().all(|p| !p.name.contains('<')));

    // Seed is the top food listing
    assert_eq!(course.places[0].category, "food");

    assert_eq!(persister.course_count().await, 1);
    assert_eq!(persister.places(course.course.id).await.len(), 6);
}

#[tokio::test]
async fn test_no_results_stores_no_course() {
    let gateway = Arc::new(common::StubGateway::empty());
    let builder = common::course_builder(gateway.clone());
    let persister = InMemoryCoursePersister::new();

    let response = builder
        .build_course(Preferences::new("없는동네"), &persister)
        .await
        .unwrap();

    // smart, relaxed and simple each ran all three categories
    assert_eq!(gateway.calls().len(), 9);
    assert!(response.courses.is_empty());
    assert_eq!(response.locale.name, "없는동네");
    assert!(persister.locale("없는동네").await.is_some());
    assert_eq!(persister.course_count().await, 0);
}

#[tokio::test]
async fn test_simple_level_queries() {
    let gateway = Arc::new(common::StubGateway::new(|query, sort| {
        if sort == SortMode::Random && query == "망원동 맛집" {
            vec![common::create_test_listing("망원 칼국수", "한식>칼국수", 1269000000, 375550000)]
        } else {
            Vec::new()
        }
    }));
    let builder = common::course_builder(gateway.clone());
    let persister = InMemoryCoursePersister::new();

    let prefs = Preferences {
        transport: TransportMode::Car,
        theme: Some(Theme::Local),
        ..Preferences::new("망원동")
    };
    let response = builder.build_course(prefs, &persister).await.unwrap();

    let calls = gateway.calls();
    assert_eq!(calls.len(), 9);
    assert!(calls[0].query.starts_with("망원동 주차"));
    assert!(calls[3].query.starts_with("망원동 로컬"));

    let simple: Vec<&str> = calls[6..].iter().map(|c| c.query.as_str()).collect();
    assert!(simple.contains(&"망원동 맛집"));
    assert!(simple.contains(&"망원동 카페"));
    assert!(simple.contains(&"망원동 가볼만한곳"));
    assert!(calls[6..].iter().all(|c| c.count == 5));

    assert_eq!(response.courses.len(), 1);
    assert_eq!(response.courses[0].places.len(), 1);
    assert!(response.courses[0].legs.is_empty());
}

#[tokio::test]
async fn test_place_failure_removes_course() {
    let gateway = Arc::new(common::seongsu_gateway());
    let builder = common::course_builder(gateway);
    let persister = common::FlakyPersister::failing_places();

    let result = builder
        .build_course(Preferences::new("성수동"), &persister)
        .await;

    match result {
        Err(AppError::Persistence(msg)) => assert!(msg.contains("place insert rejected")),
        other => panic!("expected persistence error, got {:?}", other.map(|_| ())),
    }
    assert_eq!(persister.delete_calls.lock().unwrap().len(), 1);
    assert_eq!(persister.inner.course_count().await, 0);
}

#[tokio::test]
async fn test_failed_rollback_keeps_original_error() {
    let gateway = Arc::new(common::seongsu_gateway());
    let builder = common::course_builder(gateway);
    let persister = common::FlakyPersister::failing_places();
    persister.fail_delete.store(true, Ordering::SeqCst);

    let result = builder
        .build_course(Preferences::new("성수동"), &persister)
        .await;

    match result {
        Err(AppError::Persistence(msg)) => assert!(msg.contains("place insert rejected")),
        other => panic!("expected persistence error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_mood_words_in_region_become_tags() {
    let gateway = Arc::new(common::seongsu_gateway());
    let builder = common::course_builder(gateway.clone());
    let persister = InMemoryCoursePersister::new();

    let response = builder
        .build_course(Preferences::new("성수동 이색 데이트"), &persister)
        .await
        .unwrap();

    assert_eq!(response.courses[0].course.themes, vec!["이색적인".to_string()]);
    assert!(gateway.calls()[0].query.contains("이색적인"));
}
