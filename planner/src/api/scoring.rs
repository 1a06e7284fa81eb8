use rand::seq::SliceRandom;
use rand::Rng;

use super::models::{MatchTier, PlaceDocument};
use super::util::{haversine_km, parse_coordinate};

const MIN_TOLERANCE_KM: f64 = 0.2;
const TOLERANCE_RATIO: f64 = 0.25;
const GOOD_TIER_FACTOR: f64 = 1.5;
const FALLBACK_POOL_SIZE: usize = 10;

#[derive(Debug, Clone)]
pub(super) struct ScoredPlace {
    pub(super) place: PlaceDocument,
    pub(super) lat: f64,
    pub(super) lng: f64,
    pub(super) distance_km: f64,
    pub(super) distance_delta: f64,
}

#[derive(Debug)]
pub(super) struct Selection<'a> {
    pub(super) candidate: &'a ScoredPlace,
    pub(super) tier: MatchTier,
}

// The requested distance is a round trip.
pub(super) fn target_distance_km(desired_km: f64) -> f64 {
    desired_km / 2.0
}

pub(super) fn tolerance_km(target_km: f64) -> f64 {
    (target_km * TOLERANCE_RATIO).max(MIN_TOLERANCE_KM)
}

pub(super) fn score_places(
    start: (f64, f64),
    places: Vec<PlaceDocument>,
    target_km: f64,
) -> Vec<ScoredPlace> {
    let mut scored: Vec<ScoredPlace> = places
        .into_iter()
        .filter_map(|place| {
            let lat = parse_coordinate(place.y.as_ref())?;
            let lng = parse_coordinate(place.x.as_ref())?;
            let distance_km = haversine_km(start, (lat, lng));
            Some(ScoredPlace {
                place,
                lat,
                lng,
                distance_km,
                distance_delta: (distance_km - target_km).abs(),
            })
        })
        .collect();

    scored.sort_by(|a, b| a.distance_delta.total_cmp(&b.distance_delta));
    scored
}

pub(super) fn select_candidate<'a, R: Rng + ?Sized>(
    scored: &'a [ScoredPlace],
    target_km: f64,
    rng: &mut R,
) -> Option<Selection<'a>> {
    if scored.is_empty() {
        return None;
    }

    let tolerance = tolerance_km(target_km);
    let within = move |limit: f64| -> Vec<&'a ScoredPlace> {
        scored.iter().filter(|c| c.distance_delta <= limit).collect()
    };

    let perfect = within(tolerance);
    let (tier, pool) = if !perfect.is_empty() {
        (MatchTier::Perfect, perfect)
    } else {
        let good = within(tolerance * GOOD_TIER_FACTOR);
        if !good.is_empty() {
            (MatchTier::Good, good)
        } else {
            let fallback: Vec<&ScoredPlace> = scored.iter().take(FALLBACK_POOL_SIZE).collect();
            (MatchTier::Fallback, fallback)
        }
    };

    let candidate = *pool.choose(rng)?;
    log::info!(
        "Selected {:?} from {:?} tier ({} of {} candidates): one-way {:.3} km, round trip {:.3} km, target {:.3} km ± {:.3}",
        candidate.place.place_name.as_deref().unwrap_or("<unnamed>"),
        tier,
        pool.len(),
        scored.len(),
        candidate.distance_km,
        candidate.distance_km * 2.0,
        target_km,
        tolerance
    );

    Some(Selection { candidate, tier })
}
