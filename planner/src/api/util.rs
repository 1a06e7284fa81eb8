use super::models::RawCoordinate;

const EARTH_RADIUS_KM: f64 = 6371.0;

pub(super) const MIN_RADIUS_M: u32 = 500;
pub(super) const MAX_RADIUS_M: u32 = 20_000;

pub(super) fn haversine_km(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (lat1, lng1) = (a.0.to_radians(), a.1.to_radians());
    let (lat2, lng2) = (b.0.to_radians(), b.1.to_radians());
    let dlat = lat2 - lat1;
    let dlng = lng2 - lng1;

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    // rounding can push h past 1 near antipodes
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

pub(super) fn search_radius_m(desired_km: f64) -> u32 {
    let meters = (desired_km * 1000.0).clamp(MIN_RADIUS_M as f64, MAX_RADIUS_M as f64);
    meters as u32
}

pub(super) fn parse_coordinate(raw: Option<&RawCoordinate>) -> Option<f64> {
    let value = match raw? {
        RawCoordinate::Number(n) => *n,
        RawCoordinate::Text(s) => s.trim().parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

// Debug keeps the trailing ".0" on integral values, so 127.0 stays "127.0".
pub(super) fn decimal_text(value: f64) -> String {
    format!("{value:?}")
}

pub(super) fn coordinate_text(raw: Option<&RawCoordinate>, parsed: f64) -> String {
    match raw {
        Some(RawCoordinate::Text(s)) => s.trim().to_string(),
        _ => decimal_text(parsed),
    }
}

pub(super) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
