use axum::Router;
use datecourse::cache::{LevelCache, MemoryLevelCache, RedisLevelCache};
use datecourse::config::Config;
use datecourse::constants::DEFAULT_MEMORY_CACHE_MAX_ENTRIES;
use datecourse::db::{CoursePersister, InMemoryCoursePersister, PgCoursePersister};
use datecourse::services::course_builder::CourseBuilder;
use datecourse::services::search_gateway::NaverSearchGateway;
use datecourse::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "datecourse=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting date course API server");
    tracing::info!("Configuration loaded successfully");

    // Course store: Postgres when configured, otherwise process memory
    let persister: Arc<dyn CoursePersister> = if let Some(ref database_url) = config.database_url {
        tracing::info!("Connecting to database...");
        let db_pool = datecourse::db::create_pool(database_url).await?;
        tracing::info!("Database connection established");

        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&db_pool).await?;
        tracing::info!("Database migrations completed");

        Arc::new(PgCoursePersister::new(db_pool))
    } else {
        tracing::warn!("DATABASE_URL not set. Courses will only be kept in memory.");
        Arc::new(InMemoryCoursePersister::new())
    };

    // Level cache: try Redis, fall back to in-memory
    let cache: Arc<dyn LevelCache> = if let Some(ref redis_url) = config.redis_url {
        tracing::info!("Connecting to Redis cache...");
        match RedisLevelCache::new(redis_url).await {
            Ok(redis_cache) => {
                tracing::info!("Redis cache connection established");
                Arc::new(redis_cache)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to connect to Redis: {}. Falling back to in-memory cache.",
                    e
                );
                Arc::new(MemoryLevelCache::new(DEFAULT_MEMORY_CACHE_MAX_ENTRIES))
            }
        }
    } else {
        tracing::info!("Redis URL not configured. Using in-memory cache.");
        Arc::new(MemoryLevelCache::new(DEFAULT_MEMORY_CACHE_MAX_ENTRIES))
    };

    // Initialize services
    tracing::info!(
        credentials = config.has_search_credentials(),
        "Local search provider configured: {}",
        config.has_search_credentials()
    );
    let gateway = NaverSearchGateway::from_config(&config);
    let course_builder = CourseBuilder::new(Arc::new(gateway), config.course_builder.clone())
        .with_cache(cache.clone(), config.level_cache_policy());

    // Create application state
    let state = Arc::new(AppState {
        course_builder,
        persister,
        cache: Some(cache),
    });

    // Build router with CORS and tracing
    let app = Router::new()
        .nest("/api/v1", datecourse::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
