use crate::models::{CourseRecord, Locale, NewCourse, PlaceRecord, PlaceStop};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

/// Insert the locale, or refresh its description if the name already exists.
pub async fn upsert_locale(
    pool: &PgPool,
    name: &str,
    description: &str,
) -> Result<Locale, sqlx::Error> {
    sqlx::query_as::<_, Locale>(
        "INSERT INTO locales (name, description)
         VALUES ($1, $2)
         ON CONFLICT (name) DO UPDATE SET description = EXCLUDED.description
         RETURNING id, name, description, created_at",
    )
    .bind(name)
    .bind(description)
    .fetch_one(pool)
    .await
}

pub async fn insert_course(pool: &PgPool, course: &NewCourse) -> Result<CourseRecord, sqlx::Error> {
    sqlx::query_as::<_, CourseRecord>(
        "INSERT INTO courses (locale_id, title, description, themes)
         VALUES ($1, $2, $3, $4)
         RETURNING id, locale_id, title, description, themes, created_at",
    )
    .bind(course.locale_id)
    .bind(&course.title)
    .bind(&course.description)
    .bind(&course.themes)
    .fetch_one(pool)
    .await
}

/// Insert all stops of a course in one statement, so either every stop is
/// stored or none is.
pub async fn insert_places(
    pool: &PgPool,
    course_id: Uuid,
    stops: &[PlaceStop],
) -> Result<Vec<PlaceRecord>, sqlx::Error> {
    if stops.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
        "INSERT INTO course_places (course_id, name, address, category, category_label, \
         description, link, mapx, mapy, sequence_order) ",
    );
    builder.push_values(stops, |mut row, stop| {
        row.push_bind(course_id)
            .push_bind(&stop.name)
            .push_bind(&stop.address)
            .push_bind(stop.category.as_str())
            .push_bind(&stop.category_label)
            .push_bind(&stop.description)
            .push_bind(&stop.link)
            .push_bind(stop.point.x)
            .push_bind(stop.point.y)
            .push_bind(stop.sequence_order as i32);
    });
    builder.push(
        " RETURNING id, course_id, name, address, category, category_label, \
         description, link, mapx, mapy, sequence_order",
    );

    let mut places = builder
        .build_query_as::<PlaceRecord>()
        .fetch_all(pool)
        .await?;
    places.sort_by_key(|p| p.sequence_order);
    Ok(places)
}

/// Delete a course; its places go with it through the foreign key cascade.
pub async fn delete_course(pool: &PgPool, course_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM courses WHERE id = $1")
        .bind(course_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn find_places_for_course(
    pool: &PgPool,
    course_id: Uuid,
) -> Result<Vec<PlaceRecord>, sqlx::Error> {
    sqlx::query_as::<_, PlaceRecord>(
        "SELECT id, course_id, name, address, category, category_label,
                description, link, mapx, mapy, sequence_order
         FROM course_places
         WHERE course_id = $1
         ORDER BY sequence_order",
    )
    .bind(course_id)
    .fetch_all(pool)
    .await
}
