use std::sync::Arc;

use actix_web::{get, post, web, HttpResponse, Responder};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

use super::error::ApiError;
use super::kakao::{collect_places, PlaceQuery, PlaceSearch, SortMode};
use super::link::{build_walk_url, RoutePoint};
use super::models::{RecommendRequest, RecommendResponse, SelectedPlace};
use super::scoring::{score_places, select_candidate, target_distance_km, Selection};
use super::util::{coordinate_text, decimal_text, round3, search_radius_m};

const START_POINT_NAME: &str = "Start";
const FALLBACK_DESTINATION_NAME: &str = "Destination";

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) search: Arc<dyn PlaceSearch>,
    pub(crate) map_link_base: String,
    pub(crate) page_size: u32,
    pub(crate) max_pages: u32,
    pub(crate) sort: SortMode,
    pub(crate) selection_seed: Option<u64>,
}

impl AppState {
    fn rng(&self) -> StdRng {
        match self.selection_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

pub(super) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::Validation(err.to_string()).into()
    }))
    .service(health)
    .service(recommend);
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({"status": "ok"}))
}

#[post("/api/recommend")]
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> Result<HttpResponse, ApiError> {
    let payload = req.into_inner().validated()?;
    let start = (payload.start_lat, payload.start_lng);
    let start_point = RoutePoint::new(
        START_POINT_NAME,
        decimal_text(payload.start_lat),
        decimal_text(payload.start_lng),
    );

    let query = PlaceQuery {
        keyword: payload.theme_keyword.clone(),
        lat: payload.start_lat,
        lng: payload.start_lng,
        radius_m: search_radius_m(payload.distance_km),
        page: 1,
        size: state.page_size,
        sort: state.sort,
    };
    let places = collect_places(&*state.search, &query, state.max_pages).await?;

    let target_km = target_distance_km(payload.distance_km);
    let scored = score_places(start, places, target_km);
    let selection = select_candidate(&scored, target_km, &mut state.rng());

    let response = match selection {
        Some(selection) => {
            let destination = destination_point(&selection);
            RecommendResponse {
                route_url: build_walk_url(&state.map_link_base, &[start_point, destination]),
                selected_place: Some(summarize(&selection)),
                candidates_considered: scored.len(),
            }
        }
        None => {
            log::info!(
                "No usable places for {:?} around {:?}",
                payload.theme_keyword,
                start
            );
            RecommendResponse {
                selected_place: None,
                route_url: build_walk_url(&state.map_link_base, &[start_point]),
                candidates_considered: 0,
            }
        }
    };

    Ok(HttpResponse::Ok().json(response))
}

fn destination_point(selection: &Selection<'_>) -> RoutePoint {
    let candidate = selection.candidate;
    let place = &candidate.place;
    let name = place
        .place_name
        .clone()
        .filter(|n| !n.is_empty())
        .or_else(|| place.place_url.clone().filter(|u| !u.is_empty()))
        .unwrap_or_else(|| FALLBACK_DESTINATION_NAME.to_string());

    RoutePoint::new(
        name,
        coordinate_text(place.y.as_ref(), candidate.lat),
        coordinate_text(place.x.as_ref(), candidate.lng),
    )
}

fn summarize(selection: &Selection<'_>) -> SelectedPlace {
    let candidate = selection.candidate;
    let place = candidate.place.clone();

    SelectedPlace {
        place_name: place.place_name,
        address_name: place.address_name,
        road_address_name: place.road_address_name,
        phone: place.phone,
        place_url: place.place_url,
        category_name: place.category_name,
        x: place.x,
        y: place.y,
        distance_km: round3(candidate.distance_km),
        distance_delta: round3(candidate.distance_delta),
        round_trip_km: round3(candidate.distance_km * 2.0),
        match_tier: selection.tier,
    }
}
