use crate::constants::{NAVER_LOCAL_SEARCH_URL, SEARCH_REQUEST_TIMEOUT_SECONDS};
use crate::error::{AppError, Result};
use crate::models::{ProjectedPoint, RawListing};
use crate::services::course_builder::SortMode;
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use std::time::Duration;

/// Client for the Naver local search API.
#[derive(Clone)]
pub struct NaverClient {
    client: Client,
    client_id: String,
    client_secret: String,
    base_url: String,
}

impl NaverClient {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self::with_base_url(client_id, client_secret, NAVER_LOCAL_SEARCH_URL.to_string())
    }

    pub fn with_base_url(client_id: String, client_secret: String, base_url: String) -> Self {
        NaverClient {
            client: Client::new(),
            client_id,
            client_secret,
            base_url,
        }
    }

    /// Run one local search. Any transport, status or decoding problem is an
    /// `AppError::SearchApi`; callers decide whether to absorb it.
    pub async fn search_local(
        &self,
        query: &str,
        sort: SortMode,
        count: u32,
    ) -> Result<Vec<RawListing>> {
        tracing::debug!(
            query = %query,
            sort = sort.as_param(),
            count,
            "Naver local search: '{}' (sort={}, display={})",
            query, sort.as_param(), count
        );

        let count = count.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("query", query),
                ("display", count.as_str()),
                ("start", "1"),
                ("sort", sort.as_param()),
            ])
            .header("X-Naver-Client-Id", &self.client_id)
            .header("X-Naver-Client-Secret", &self.client_secret)
            .timeout(Duration::from_secs(SEARCH_REQUEST_TIMEOUT_SECONDS))
            .send()
            .await
            .map_err(|e| AppError::SearchApi(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::SearchApi(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let body: NaverLocalResponse = response
            .json()
            .await
            .map_err(|e| AppError::SearchApi(format!("Failed to parse response: {}", e)))?;

        tracing::debug!(
            query = %query,
            items = body.items.len(),
            "Naver local search returned {} items",
            body.items.len()
        );

        Ok(body.items.into_iter().map(RawListing::from).collect())
    }
}

// Naver API response types

#[derive(Debug, Deserialize)]
struct NaverLocalResponse {
    #[serde(default)]
    items: Vec<NaverLocalItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NaverLocalItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    road_address: String,
    #[serde(default, deserialize_with = "string_or_number")]
    mapx: String,
    #[serde(default, deserialize_with = "string_or_number")]
    mapy: String,
}

impl From<NaverLocalItem> for RawListing {
    fn from(item: NaverLocalItem) -> Self {
        RawListing {
            point: ProjectedPoint::from_raw(&item.mapx, &item.mapy),
            title: item.title,
            link: item.link,
            category: item.category,
            description: item.description,
            address: item.address,
            road_address: item.road_address,
        }
    }
}

/// Coordinates arrive as strings, but tolerate bare numbers too.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}
