use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, Request, StatusCode};
use thiserror::Error;

use super::models::{PlaceDocument, SearchPage};
use super::util::MAX_RADIUS_M;

const KEYWORD_SEARCH_PATH: &str = "/v2/local/search/keyword";
const MAX_PAGE: u32 = 45;
pub(crate) const MAX_PAGE_SIZE: u32 = 15;

#[derive(Debug, Error)]
pub(crate) enum SearchError {
    #[error("credential is not configured")]
    MissingCredential,

    #[error("keyword search is not enabled for this app: {0}")]
    NotEnabled(String),

    #[error("status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("request timed out")]
    Timeout,

    #[error("request failed: {0}")]
    Request(reqwest::Error),

    #[error("response was not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SearchError::Timeout
        } else {
            SearchError::Request(err)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum SortMode {
    #[default]
    Accuracy,
    Distance,
}

impl SortMode {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            SortMode::Accuracy => "accuracy",
            SortMode::Distance => "distance",
        }
    }

    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "accuracy" => Some(SortMode::Accuracy),
            "distance" => Some(SortMode::Distance),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlaceQuery {
    pub(crate) keyword: String,
    pub(crate) lat: f64,
    pub(crate) lng: f64,
    pub(crate) radius_m: u32,
    pub(crate) page: u32,
    pub(crate) size: u32,
    pub(crate) sort: SortMode,
}

#[async_trait]
pub(crate) trait PlaceSearch: Send + Sync {
    async fn search_page(&self, query: &PlaceQuery) -> Result<SearchPage, SearchError>;
}

pub(crate) async fn collect_places(
    search: &dyn PlaceSearch,
    query: &PlaceQuery,
    max_pages: u32,
) -> Result<Vec<PlaceDocument>, SearchError> {
    let mut places = Vec::new();

    for offset in 0..max_pages.max(1) {
        let page_query = PlaceQuery {
            page: query.page + offset,
            ..query.clone()
        };
        let page = search.search_page(&page_query).await?;
        places.extend(page.documents);
        if page.meta.is_end {
            break;
        }
    }

    Ok(places)
}

pub(crate) struct KakaoLocalClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl KakaoLocalClient {
    pub(crate) fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, SearchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub(super) fn build_request(&self, query: &PlaceQuery) -> Result<Request, SearchError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(SearchError::MissingCredential)?;

        let url = format!("{}{KEYWORD_SEARCH_PATH}", self.base_url);
        let request = self
            .client
            .get(url)
            .header(AUTHORIZATION, format!("KakaoAK {api_key}"))
            .query(&[
                ("query", query.keyword.clone()),
                ("x", query.lng.to_string()),
                ("y", query.lat.to_string()),
                ("radius", query.radius_m.min(MAX_RADIUS_M).to_string()),
                ("page", query.page.clamp(1, MAX_PAGE).to_string()),
                ("size", query.size.clamp(1, MAX_PAGE_SIZE).to_string()),
                ("sort", query.sort.as_str().to_string()),
            ])
            .build()?;

        Ok(request)
    }
}

#[async_trait]
impl PlaceSearch for KakaoLocalClient {
    async fn search_page(&self, query: &PlaceQuery) -> Result<SearchPage, SearchError> {
        let request = self.build_request(query)?;
        log::info!(
            "Calling Kakao keyword search: query={:?} radius={}m page={}",
            query.keyword,
            query.radius_m,
            query.page
        );

        let resp = self.client.execute(request).await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(classify_failure(status, text));
        }

        let page: SearchPage = serde_json::from_str(&text).map_err(|e| {
            log::error!("Failed to parse Kakao search response: {e}. Body: {text}");
            e
        })?;
        log::debug!(
            "Kakao returned {} documents (total_count={:?}, is_end={})",
            page.documents.len(),
            page.meta.total_count,
            page.meta.is_end
        );

        Ok(page)
    }
}

pub(super) fn classify_failure(status: StatusCode, body: String) -> SearchError {
    if body.contains("NotAuthorizedError") && body.contains("OPEN_MAP_AND_LOCAL") {
        SearchError::NotEnabled(body)
    } else {
        SearchError::Status { status, body }
    }
}
