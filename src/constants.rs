//! Stable application-wide constants.
//!
//! Values here are structural invariants, algorithm coefficients, and default
//! fallbacks for env-var-based configuration. They should rarely change.
//! For tuning knobs that benefit from runtime experimentation, see
//! [`CourseBuilderConfig`](crate::config::CourseBuilderConfig) instead.

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "3000";

// --- Search provider ---

/// Naver local search endpoint. Overridden by `NAVER_SEARCH_BASE_URL`.
pub const NAVER_LOCAL_SEARCH_URL: &str = "https://openapi.naver.com/v1/search/local.json";
/// Per-request timeout for the search provider. The core defines no deadline
/// of its own; the gateway owns this one.
pub const SEARCH_REQUEST_TIMEOUT_SECONDS: u64 = 10;

// --- Cache defaults ---

/// How long a smart-level result set stays cached: 1 hour.
/// Overridden by `LEVEL_CACHE_SMART_TTL`.
pub const DEFAULT_SMART_LEVEL_CACHE_TTL_SECONDS: u64 = 3_600;
/// Relaxed-level results are broader and go stale sooner: 10 minutes.
/// Overridden by `LEVEL_CACHE_RELAXED_TTL`.
pub const DEFAULT_RELAXED_LEVEL_CACHE_TTL_SECONDS: u64 = 600;
/// Maximum level result sets held by the in-memory cache.
pub const DEFAULT_MEMORY_CACHE_MAX_ENTRIES: u64 = 1_000;

// --- Course building defaults ---

/// Smart-level results below this total trigger the relaxed level.
pub const DEFAULT_SMART_MIN_RESULTS: usize = 3;
/// Relaxed-level results below this total trigger the simple level.
pub const DEFAULT_RELAXED_MIN_RESULTS: usize = 2;
/// Results requested per query at the smart and relaxed levels.
pub const DEFAULT_SEARCH_DISPLAY_COUNT: u32 = 10;
/// Results requested per query at the simple level.
pub const DEFAULT_SIMPLE_DISPLAY_COUNT: u32 = 5;
/// Hard upper bound on stops in one course.
pub const MAX_COURSE_STOPS: usize = 6;
/// Number of leading pool entries the seed is drawn from.
pub const DEFAULT_SEED_WINDOW: usize = 5;
/// Sequencing candidate window when driving.
pub const DEFAULT_CAR_CANDIDATE_WINDOW: usize = 40;
/// Sequencing candidate window on public transit / walking.
pub const DEFAULT_PUBLIC_CANDIDATE_WINDOW: usize = 20;
/// Distance multiplier when driving; far venues matter less by car.
pub const DEFAULT_CAR_DISTANCE_WEIGHT: f64 = 0.3;
/// Distance multiplier on public transit / walking.
pub const DEFAULT_PUBLIC_DISTANCE_WEIGHT: f64 = 1.0;
/// Weight added when a candidate repeats an already chosen category.
pub const DEFAULT_CATEGORY_PENALTY: f64 = 800.0;

// --- Leg travel estimates ---

/// Walking pace used for public-transit legs (km/h).
pub const PUBLIC_TRAVEL_SPEED_KMH: f64 = 4.5;
/// Urban driving pace (km/h).
pub const CAR_TRAVEL_SPEED_KMH: f64 = 25.0;
/// Mean Earth radius for haversine leg distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;
/// Naver `mapx` / `mapy` are WGS84 degrees multiplied by this factor.
pub const NAVER_COORDINATE_SCALE: f64 = 10_000_000.0;
