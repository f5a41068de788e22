mod candidate_scoring;
mod course_labels;
mod keywords;
mod query_planner;
mod route_sequencing;
pub mod travel;

pub use candidate_scoring::{categorize, rank_pool, score};
pub use course_labels::{course_description, course_title};
pub use keywords::{CategoryMarkers, KeywordTables, LabelTable, ScoringRules};
pub use query_planner::{
    generate_queries, infer_atmosphere, FallbackLevel, SearchQueries, SortMode,
};
pub use route_sequencing::{sequence_stops, CandidatePools, SequencingParams};

use crate::cache::{level_cache_key, LevelCache, LevelCachePolicy};
use crate::config::CourseBuilderConfig;
use crate::db::CoursePersister;
use crate::error::{AppError, Result};
use crate::models::{
    CourseDraft, CourseResponse, NewCourse, PlaceCategory, Preferences, RawListing,
    SearchResponse,
};
use crate::services::search_gateway::SearchGateway;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Unranked results of one fallback level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FetchedListings {
    pub food: Vec<RawListing>,
    pub cafe: Vec<RawListing>,
    pub activity: Vec<RawListing>,
}

impl FetchedListings {
    pub fn total(&self) -> usize {
        self.food.len() + self.cafe.len() + self.activity.len()
    }
}

/// Turns preferences into a sequenced course and stores it.
pub struct CourseBuilder {
    gateway: Arc<dyn SearchGateway>,
    config: CourseBuilderConfig,
    tables: KeywordTables,
    cache: Option<(Arc<dyn LevelCache>, LevelCachePolicy)>,
}

impl CourseBuilder {
    pub fn new(gateway: Arc<dyn SearchGateway>, config: CourseBuilderConfig) -> Self {
        CourseBuilder {
            gateway,
            config,
            tables: KeywordTables::default(),
            cache: None,
        }
    }

    /// Reuse smart and relaxed level results for as long as `policy` allows.
    pub fn with_cache(mut self, cache: Arc<dyn LevelCache>, policy: LevelCachePolicy) -> Self {
        self.cache = Some((cache, policy));
        self
    }

    /// Fill in atmosphere tags from mood words in the region text when the
    /// request carries neither a theme nor tags.
    pub fn prepare_preferences(&self, mut prefs: Preferences) -> Preferences {
        if let Some(tags) = infer_atmosphere(&prefs, &self.tables) {
            tracing::debug!(region = %prefs.region, tags = ?tags, "Inferred atmosphere tags");
            prefs.atmosphere = tags;
        }
        prefs
    }

    /// Run the three category searches of one level concurrently, or take
    /// them from the cache. Only non-empty results are cached.
    async fn fetch_level(
        &self,
        level: FallbackLevel,
        prefs: &Preferences,
        count: u32,
    ) -> FetchedListings {
        let queries = generate_queries(prefs, level, &self.tables);
        let cache_slot = self.cache.as_ref().and_then(|(cache, policy)| {
            let ttl = policy.ttl_for(level)?;
            let key = level_cache_key(level, &queries, count)?;
            Some((cache, key, ttl))
        });

        if let Some((cache, key, _)) = &cache_slot {
            if let Some(cached) = cache.load(key).await {
                tracing::debug!(level = %level, key = %key, "Level results served from cache");
                return cached;
            }
        }

        let (food, cafe, activity) = futures::join!(
            self.gateway.search(&queries.food, queries.sort, count),
            self.gateway.search(&queries.cafe, queries.sort, count),
            self.gateway.search(&queries.activity, queries.sort, count),
        );
        let fetched = FetchedListings {
            food,
            cafe,
            activity,
        };

        if let Some((cache, key, ttl)) = cache_slot {
            if fetched.total() > 0 {
                cache.save(&key, &fetched, ttl).await;
            }
        }

        fetched
    }

    /// Search with escalating fallback: smart, then relaxed when fewer than
    /// `smart_min_results` came back, then simple when fewer than
    /// `relaxed_min_results`. Each level replaces the previous results.
    pub async fn gather_listings(&self, prefs: &Preferences) -> (FallbackLevel, FetchedListings) {
        let mut level = FallbackLevel::Smart;
        let mut fetched = self
            .fetch_level(level, prefs, self.config.search_display_count)
            .await;
        tracing::info!(region = %prefs.region, level = %level, total = fetched.total(), "Search level finished");

        if fetched.total() < self.config.smart_min_results {
            level = FallbackLevel::Relaxed;
            fetched = self
                .fetch_level(level, prefs, self.config.search_display_count)
                .await;
            tracing::info!(region = %prefs.region, level = %level, total = fetched.total(), "Search level finished");
        }

        if fetched.total() < self.config.relaxed_min_results {
            level = FallbackLevel::Simple;
            fetched = self
                .fetch_level(level, prefs, self.config.simple_display_count)
                .await;
            tracing::info!(region = %prefs.region, level = %level, total = fetched.total(), "Search level finished");
        }

        (level, fetched)
    }

    /// Score and order each pool.
    pub fn rank(&self, fetched: FetchedListings, prefs: &Preferences) -> CandidatePools {
        CandidatePools {
            food: rank_pool(fetched.food, PlaceCategory::Food, prefs, &self.tables),
            cafe: rank_pool(fetched.cafe, PlaceCategory::Cafe, prefs, &self.tables),
            activity: rank_pool(fetched.activity, PlaceCategory::Activity, prefs, &self.tables),
        }
    }

    /// Search, rank and sequence without touching storage.
    /// `prefs` should already have gone through `prepare_preferences`.
    pub async fn plan_course(&self, prefs: &Preferences) -> CourseDraft {
        let (level, fetched) = self.gather_listings(prefs).await;
        let pools = self.rank(fetched, prefs);
        let params = SequencingParams::for_transport(&self.config, prefs.transport);
        let stops = sequence_stops(pools, &params);

        tracing::info!(
            region = %prefs.region,
            level = %level,
            transport = %prefs.transport,
            stops = stops.len(),
            "Planned course"
        );

        CourseDraft {
            title: course_title(prefs, &self.tables),
            description: course_description(prefs, &self.tables),
            themes: prefs.atmosphere.clone(),
            stops,
        }
    }

    /// Plan a course and store it through `persister`.
    ///
    /// The locale is always upserted. A course row is only written when at
    /// least one stop was found. If the stops cannot be stored the course row
    /// is deleted again and the storage error is returned.
    pub async fn build_course(
        &self,
        prefs: Preferences,
        persister: &dyn CoursePersister,
    ) -> Result<SearchResponse> {
        let prefs = self.prepare_preferences(prefs);
        let draft = self.plan_course(&prefs).await;

        let locale = persister
            .upsert_locale(
                &prefs.region,
                &format!("AI Recommended course for {}", prefs.region),
            )
            .await?;

        if draft.stops.is_empty() {
            tracing::info!(region = %prefs.region, "No places found, skipping course");
            return Ok(SearchResponse {
                locale,
                courses: Vec::new(),
            });
        }

        let course = persister
            .insert_course(&NewCourse {
                locale_id: locale.id,
                title: draft.title,
                description: draft.description,
                themes: draft.themes,
            })
            .await?;

        let places = match persister.insert_places(course.id, &draft.stops).await {
            Ok(places) => places,
            Err(e) => {
                tracing::error!(course_id = %course.id, error = %e, "Failed to store places, removing course");
                if let Err(rollback_err) = persister.delete_course(course.id).await {
                    tracing::error!(
                        course_id = %course.id,
                        error = %rollback_err,
                        "Failed to remove course after place insert failure"
                    );
                }
                return Err(AppError::Persistence(format!(
                    "Failed to store places for course {}: {}",
                    course.id, e
                )));
            }
        };

        let legs = travel::course_legs(&draft.stops, prefs.transport);

        tracing::info!(
            course_id = %course.id,
            locale = %locale.name,
            places = places.len(),
            "Stored course"
        );

        Ok(SearchResponse {
            locale,
            courses: vec![CourseResponse {
                course,
                places,
                legs,
            }],
        })
    }
}
