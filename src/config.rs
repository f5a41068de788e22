use crate::cache::LevelCachePolicy;
use crate::constants::*;
use crate::models::TransportMode;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// When unset, courses are kept in process memory only
    pub database_url: Option<String>,
    pub redis_url: Option<String>,
    /// Missing credentials are not fatal: searches degrade to empty results
    pub naver_client_id: Option<String>,
    pub naver_client_secret: Option<String>,
    pub naver_base_url: Option<String>,
    /// Lifetime of cached smart-level results; 0 disables
    pub smart_level_cache_ttl: u64,
    /// Lifetime of cached relaxed-level results; 0 disables
    pub relaxed_level_cache_ttl: u64,
    pub course_builder: CourseBuilderConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseBuilderConfig {
    /// Smart-level total below which the relaxed level runs
    pub smart_min_results: usize,

    /// Relaxed-level total below which the simple level runs
    pub relaxed_min_results: usize,

    /// Results requested per query at smart and relaxed levels
    pub search_display_count: u32,

    /// Results requested per query at the simple level
    pub simple_display_count: u32,

    /// Maximum number of stops in a course (capped at MAX_COURSE_STOPS)
    pub max_stops: usize,

    /// The seed is drawn from this many leading pool entries
    pub seed_window: usize,

    /// Sequencing window size when driving
    pub car_candidate_window: usize,

    /// Sequencing window size on public transit
    pub public_candidate_window: usize,

    /// Distance multiplier when driving
    pub car_distance_weight: f64,

    /// Distance multiplier on public transit
    pub public_distance_weight: f64,

    /// Weight added for repeating an already chosen category
    pub category_penalty: f64,
}

impl Default for CourseBuilderConfig {
    fn default() -> Self {
        Self {
            smart_min_results: DEFAULT_SMART_MIN_RESULTS,
            relaxed_min_results: DEFAULT_RELAXED_MIN_RESULTS,
            search_display_count: DEFAULT_SEARCH_DISPLAY_COUNT,
            simple_display_count: DEFAULT_SIMPLE_DISPLAY_COUNT,
            max_stops: MAX_COURSE_STOPS,
            seed_window: DEFAULT_SEED_WINDOW,
            car_candidate_window: DEFAULT_CAR_CANDIDATE_WINDOW,
            public_candidate_window: DEFAULT_PUBLIC_CANDIDATE_WINDOW,
            car_distance_weight: DEFAULT_CAR_DISTANCE_WEIGHT,
            public_distance_weight: DEFAULT_PUBLIC_DISTANCE_WEIGHT,
            category_penalty: DEFAULT_CATEGORY_PENALTY,
        }
    }
}

impl CourseBuilderConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let config = Self {
            smart_min_results: env::var("COURSE_SMART_MIN_RESULTS")
                .unwrap_or_else(|_| defaults.smart_min_results.to_string())
                .parse()
                .map_err(|_| "Invalid COURSE_SMART_MIN_RESULTS")?,

            relaxed_min_results: env::var("COURSE_RELAXED_MIN_RESULTS")
                .unwrap_or_else(|_| defaults.relaxed_min_results.to_string())
                .parse()
                .map_err(|_| "Invalid COURSE_RELAXED_MIN_RESULTS")?,

            search_display_count: env::var("COURSE_SEARCH_DISPLAY_COUNT")
                .unwrap_or_else(|_| defaults.search_display_count.to_string())
                .parse()
                .map_err(|_| "Invalid COURSE_SEARCH_DISPLAY_COUNT")?,

            simple_display_count: env::var("COURSE_SIMPLE_DISPLAY_COUNT")
                .unwrap_or_else(|_| defaults.simple_display_count.to_string())
                .parse()
                .map_err(|_| "Invalid COURSE_SIMPLE_DISPLAY_COUNT")?,

            max_stops: env::var("COURSE_MAX_STOPS")
                .unwrap_or_else(|_| defaults.max_stops.to_string())
                .parse()
                .map_err(|_| "Invalid COURSE_MAX_STOPS")?,

            seed_window: env::var("COURSE_SEED_WINDOW")
                .unwrap_or_else(|_| defaults.seed_window.to_string())
                .parse()
                .map_err(|_| "Invalid COURSE_SEED_WINDOW")?,

            car_candidate_window: env::var("COURSE_CAR_CANDIDATE_WINDOW")
                .unwrap_or_else(|_| defaults.car_candidate_window.to_string())
                .parse()
                .map_err(|_| "Invalid COURSE_CAR_CANDIDATE_WINDOW")?,

            public_candidate_window: env::var("COURSE_PUBLIC_CANDIDATE_WINDOW")
                .unwrap_or_else(|_| defaults.public_candidate_window.to_string())
                .parse()
                .map_err(|_| "Invalid COURSE_PUBLIC_CANDIDATE_WINDOW")?,

            car_distance_weight: env::var("COURSE_CAR_DISTANCE_WEIGHT")
                .unwrap_or_else(|_| defaults.car_distance_weight.to_string())
                .parse()
                .map_err(|_| "Invalid COURSE_CAR_DISTANCE_WEIGHT")?,

            public_distance_weight: env::var("COURSE_PUBLIC_DISTANCE_WEIGHT")
                .unwrap_or_else(|_| defaults.public_distance_weight.to_string())
                .parse()
                .map_err(|_| "Invalid COURSE_PUBLIC_DISTANCE_WEIGHT")?,

            category_penalty: env::var("COURSE_CATEGORY_PENALTY")
                .unwrap_or_else(|_| defaults.category_penalty.to_string())
                .parse()
                .map_err(|_| "Invalid COURSE_CATEGORY_PENALTY")?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_stops == 0 || self.max_stops > MAX_COURSE_STOPS {
            return Err(format!(
                "COURSE_MAX_STOPS must be between 1 and {}",
                MAX_COURSE_STOPS
            ));
        }
        if self.seed_window == 0 {
            return Err("COURSE_SEED_WINDOW must be at least 1".to_string());
        }
        if self.car_distance_weight < 0.0 || self.public_distance_weight < 0.0 {
            return Err("Distance weights must not be negative".to_string());
        }
        Ok(())
    }

    pub fn candidate_window(&self, transport: TransportMode) -> usize {
        match transport {
            TransportMode::Car => self.car_candidate_window,
            TransportMode::Public => self.public_candidate_window,
        }
    }

    pub fn distance_weight(&self, transport: TransportMode) -> f64 {
        match transport {
            TransportMode::Car => self.car_distance_weight,
            TransportMode::Public => self.public_distance_weight,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            database_url: non_empty_var("DATABASE_URL"),
            redis_url: non_empty_var("REDIS_URL"),
            naver_client_id: non_empty_var("NAVER_SEARCH_CLIENT_ID"),
            naver_client_secret: non_empty_var("NAVER_SEARCH_CLIENT_SECRET"),
            naver_base_url: non_empty_var("NAVER_SEARCH_BASE_URL"),
            smart_level_cache_ttl: env::var("LEVEL_CACHE_SMART_TTL")
                .unwrap_or_else(|_| DEFAULT_SMART_LEVEL_CACHE_TTL_SECONDS.to_string())
                .parse()
                .map_err(|_| "Invalid LEVEL_CACHE_SMART_TTL")?,
            relaxed_level_cache_ttl: env::var("LEVEL_CACHE_RELAXED_TTL")
                .unwrap_or_else(|_| DEFAULT_RELAXED_LEVEL_CACHE_TTL_SECONDS.to_string())
                .parse()
                .map_err(|_| "Invalid LEVEL_CACHE_RELAXED_TTL")?,
            course_builder: CourseBuilderConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn has_search_credentials(&self) -> bool {
        self.naver_client_id.is_some() && self.naver_client_secret.is_some()
    }

    pub fn level_cache_policy(&self) -> LevelCachePolicy {
        LevelCachePolicy {
            smart_ttl_seconds: self.smart_level_cache_ttl,
            relaxed_ttl_seconds: self.relaxed_level_cache_ttl,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_defaults_match_constants() {
        let config = CourseBuilderConfig::default();
        assert_eq!(config.smart_min_results, 3);
        assert_eq!(config.relaxed_min_results, 2);
        assert_eq!(config.max_stops, 6);
        assert_eq!(config.candidate_window(TransportMode::Car), 40);
        assert_eq!(config.candidate_window(TransportMode::Public), 20);
        assert_eq!(config.distance_weight(TransportMode::Car), 0.3);
        assert_eq!(config.distance_weight(TransportMode::Public), 1.0);
        assert_eq!(config.category_penalty, 800.0);
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        env::set_var("COURSE_CATEGORY_PENALTY", "500");
        env::set_var("COURSE_CAR_CANDIDATE_WINDOW", "30");
        let config = CourseBuilderConfig::from_env().unwrap();
        env::remove_var("COURSE_CATEGORY_PENALTY");
        env::remove_var("COURSE_CAR_CANDIDATE_WINDOW");

        assert_eq!(config.category_penalty, 500.0);
        assert_eq!(config.car_candidate_window, 30);
        assert_eq!(config.public_candidate_window, 20);
    }

    #[test]
    #[serial]
    fn test_level_cache_ttls_from_env() {
        env::set_var("LEVEL_CACHE_RELAXED_TTL", "0");
        let config = Config::from_env().unwrap();
        env::remove_var("LEVEL_CACHE_RELAXED_TTL");

        let policy = config.level_cache_policy();
        assert_eq!(policy.smart_ttl_seconds, DEFAULT_SMART_LEVEL_CACHE_TTL_SECONDS);
        assert_eq!(policy.relaxed_ttl_seconds, 0);
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_invalid_values() {
        env::set_var("COURSE_MAX_STOPS", "many");
        assert!(CourseBuilderConfig::from_env().is_err());

        env::set_var("COURSE_MAX_STOPS", "9");
        assert!(CourseBuilderConfig::from_env().is_err());
        env::remove_var("COURSE_MAX_STOPS");
    }
}
