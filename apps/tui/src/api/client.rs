use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::api::{ApiError, ApiResponse, ExperienceCache};
use crate::domain::{Experience, Location};
use crate::store::LocationSource;

/// Backend used when no base URL is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

const LOCATIONS_PATH: &str = "/api/locations";
const EXPERIENCES_PATH: &str = "/api/experiences";

/// Locations served when the backend cannot be reached.
pub fn fallback_locations() -> Vec<Location> {
    vec![
        Location::new("1", "MUMBAI01", "Mumbai"),
        Location::new("2", "PUNE01", "Pune"),
        Location::new("3", "DELHI01", "Delhi"),
        Location::new("4", "DELHI01", "Banglore"),
    ]
}

/// Optional filters accepted by `/api/experiences`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperienceQuery {
    pub location: Option<String>,
    pub date: Option<String>,
    pub search: Option<String>,
}

impl ExperienceQuery {
    fn pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("location", self.location.as_deref()),
            ("date", self.date.as_deref()),
            ("search", self.search.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (key, v)))
        .collect()
    }
}

#[derive(Deserialize)]
struct ExperiencesEnvelope {
    #[serde(default)]
    data: Vec<Experience>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Client for the storefront backend.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    experiences: ExperienceCache,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, None)
    }

    /// Builds a client. `timeout` of `None` lets requests hang until the
    /// server answers.
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::transport(base_url, &e))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            experiences: ExperienceCache::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn experience_cache(&self) -> &ExperienceCache {
        &self.experiences
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Fetches the location list. Never fails: transport errors, non-2xx
    /// answers and undecodable bodies all yield the fallback list.
    pub async fn fetch_locations(&self) -> ApiResponse<Vec<Location>> {
        let url = self.endpoint(LOCATIONS_PATH);

        match get_json::<ApiResponse<Vec<Location>>>(&self.http, &url).await {
            Ok(body) => {
                let locations = body.data.unwrap_or_default();
                debug!(count = locations.len(), "locations loaded");
                ApiResponse::ok(locations)
            }
            Err(e) => {
                warn!(error = %e, "location fetch failed, serving fallback locations");
                ApiResponse::ok(fallback_locations())
            }
        }
    }

    /// Fetches the experience collection once per client. Concurrent calls
    /// share the in-flight request; errors propagate.
    pub async fn fetch_experiences(&self) -> Result<Arc<Vec<Experience>>, ApiError> {
        let http = self.http.clone();
        let url = self.endpoint(EXPERIENCES_PATH);

        self.experiences
            .get_or_fetch(move || async move {
                let body: ExperiencesEnvelope = get_json(&http, &url).await?;
                debug!(count = body.data.len(), "experiences loaded");
                Ok(body.data)
            })
            .await
    }

    /// Discards the cached collection and fetches it again.
    pub async fn refresh_experiences(&self) -> Result<Arc<Vec<Experience>>, ApiError> {
        self.experiences.invalidate().await;
        self.fetch_experiences().await
    }

    pub async fn invalidate_experiences(&self) {
        self.experiences.invalidate().await;
    }

    /// Looks an experience up in the cached collection, fetching it first
    /// when needed. `Ok(None)` means not found.
    pub async fn fetch_experience_by_id(&self, id: &str) -> Result<Option<Experience>, ApiError> {
        let experiences = self.fetch_experiences().await?;
        Ok(experiences
            .iter()
            .find(|experience| experience.matches_id(id))
            .cloned())
    }

    /// Filtered listing straight from the backend. Not cached.
    pub async fn search_experiences(
        &self,
        query: &ExperienceQuery,
    ) -> Result<Vec<Experience>, ApiError> {
        let endpoint = self.endpoint(EXPERIENCES_PATH);
        let mut url = Url::parse(&endpoint).map_err(|e| ApiError::Transport {
            url: endpoint.clone(),
            message: e.to_string(),
        })?;

        let pairs = query.pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        let body: ExperiencesEnvelope = get_json(&self.http, url.as_str()).await?;
        Ok(body.data)
    }
}

#[async_trait]
impl LocationSource for ApiClient {
    async fn fetch_locations(&self) -> ApiResponse<Vec<Location>> {
        Self::fetch_locations(self).await
    }
}

async fn get_json<T: DeserializeOwned>(http: &reqwest::Client, url: &str) -> Result<T, ApiError> {
    let response = http
        .get(url)
        .send()
        .await
        .map_err(|e| ApiError::transport(url, &e))?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or(text);
        return Err(ApiError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            message,
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ApiError::transport(url, &e))?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::decode(url, &e))
}
