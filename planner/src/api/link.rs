pub(crate) const DEFAULT_WALK_LINK_BASE: &str = "https://map.kakao.com/link/by/walk";

#[derive(Debug, Clone, PartialEq)]
pub(super) struct RoutePoint {
    pub(super) name: String,
    pub(super) lat: String,
    pub(super) lng: String,
}

impl RoutePoint {
    pub(super) fn new(
        name: impl Into<String>,
        lat: impl Into<String>,
        lng: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            lat: lat.into(),
            lng: lng.into(),
        }
    }
}

// Names are passed through as-is; a ',' or '/' inside a name splits the segment.
pub(super) fn build_walk_url(base: &str, points: &[RoutePoint]) -> String {
    let segments: Vec<String> = points
        .iter()
        .map(|p| format!("{},{},{}", p.name, p.lat, p.lng))
        .collect();
    format!("{}/{}", base.trim_end_matches('/'), segments.join("/"))
}
