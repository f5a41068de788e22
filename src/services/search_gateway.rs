use crate::config::Config;
use crate::error::AppError;
use crate::models::RawListing;
use crate::services::course_builder::SortMode;
use crate::services::naver::NaverClient;
use async_trait::async_trait;

/// Source of local listings for one search call.
///
/// Implementations never fail: any provider, configuration or decoding
/// problem is logged and surfaces as an empty list, so course building can
/// carry on with whatever the other queries returned.
#[async_trait]
pub trait SearchGateway: Send + Sync {
    async fn search(&self, query: &str, sort: SortMode, count: u32) -> Vec<RawListing>;
}

/// `SearchGateway` backed by Naver local search.
pub struct NaverSearchGateway {
    client: Option<NaverClient>,
}

impl NaverSearchGateway {
    pub fn new(client: Option<NaverClient>) -> Self {
        NaverSearchGateway { client }
    }

    /// Build from configuration. Missing credentials leave the gateway
    /// unconfigured rather than failing startup.
    pub fn from_config(config: &Config) -> Self {
        let client = match (&config.naver_client_id, &config.naver_client_secret) {
            (Some(id), Some(secret)) => Some(match &config.naver_base_url {
                Some(base_url) => {
                    NaverClient::with_base_url(id.clone(), secret.clone(), base_url.clone())
                }
                None => NaverClient::new(id.clone(), secret.clone()),
            }),
            _ => {
                tracing::warn!(
                    "NAVER_SEARCH_CLIENT_ID / NAVER_SEARCH_CLIENT_SECRET not set; searches will return no results"
                );
                None
            }
        };
        Self::new(client)
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }
}

#[async_trait]
impl SearchGateway for NaverSearchGateway {
    async fn search(&self, query: &str, sort: SortMode, count: u32) -> Vec<RawListing> {
        let Some(client) = &self.client else {
            let err = AppError::Configuration("Naver search credentials missing".to_string());
            tracing::warn!(error = %err, query = %query, "Skipping search");
            return Vec::new();
        };

        match client.search_local(query, sort, count).await {
            Ok(listings) => listings,
            Err(e) => {
                tracing::warn!(error = %e, query = %query, "Local search failed, treating as empty");
                Vec::new()
            }
        }
    }
}
