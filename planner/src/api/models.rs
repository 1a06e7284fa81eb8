use serde::{Deserialize, Serialize};

use super::error::ApiError;

#[derive(Debug, Deserialize)]
pub(super) struct RecommendRequest {
    pub(super) start_lat: f64,
    pub(super) start_lng: f64,
    pub(super) distance_km: f64,
    pub(super) theme_keyword: String,
}

impl RecommendRequest {
    pub(super) fn validated(mut self) -> Result<Self, ApiError> {
        if !self.start_lat.is_finite() || !(-90.0..=90.0).contains(&self.start_lat) {
            return Err(ApiError::Validation(
                "start_lat must be between -90 and 90".to_string(),
            ));
        }
        if !self.start_lng.is_finite() || !(-180.0..=180.0).contains(&self.start_lng) {
            return Err(ApiError::Validation(
                "start_lng must be between -180 and 180".to_string(),
            ));
        }
        if !self.distance_km.is_finite() || self.distance_km <= 0.0 {
            return Err(ApiError::Validation(
                "distance_km must be greater than 0".to_string(),
            ));
        }

        let keyword = self.theme_keyword.trim();
        if keyword.is_empty() {
            return Err(ApiError::Validation(
                "theme_keyword must not be empty".to_string(),
            ));
        }
        self.theme_keyword = keyword.to_string();

        Ok(self)
    }
}

#[derive(Debug, Serialize)]
pub(super) struct RecommendResponse {
    pub(super) selected_place: Option<SelectedPlace>,
    pub(super) route_url: String,
    pub(super) candidates_considered: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(super) enum MatchTier {
    Perfect,
    Good,
    Fallback,
}

#[derive(Debug, Serialize)]
pub(super) struct SelectedPlace {
    pub(super) place_name: Option<String>,
    pub(super) address_name: Option<String>,
    pub(super) road_address_name: Option<String>,
    pub(super) phone: Option<String>,
    pub(super) place_url: Option<String>,
    pub(super) category_name: Option<String>,
    pub(super) x: Option<RawCoordinate>,
    pub(super) y: Option<RawCoordinate>,
    pub(super) distance_km: f64,
    pub(super) distance_delta: f64,
    pub(super) round_trip_km: f64,
    pub(super) match_tier: MatchTier,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub(crate) enum RawCoordinate {
    Number(f64),
    Text(String),
}

/// One document of a keyword search page. `x` is longitude, `y` latitude.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct PlaceDocument {
    #[serde(default)]
    pub(crate) place_name: Option<String>,
    #[serde(default)]
    pub(crate) address_name: Option<String>,
    #[serde(default)]
    pub(crate) road_address_name: Option<String>,
    #[serde(default)]
    pub(crate) phone: Option<String>,
    #[serde(default)]
    pub(crate) place_url: Option<String>,
    #[serde(default)]
    pub(crate) category_name: Option<String>,
    #[serde(default)]
    pub(crate) x: Option<RawCoordinate>,
    #[serde(default)]
    pub(crate) y: Option<RawCoordinate>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchMeta {
    #[serde(default = "default_is_end")]
    pub(crate) is_end: bool,
    #[serde(default)]
    pub(crate) total_count: Option<u64>,
}

impl Default for SearchMeta {
    fn default() -> Self {
        Self {
            is_end: true,
            total_count: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct SearchPage {
    #[serde(default)]
    pub(crate) documents: Vec<PlaceDocument>,
    #[serde(default)]
    pub(crate) meta: SearchMeta,
}

fn default_is_end() -> bool {
    true
}
