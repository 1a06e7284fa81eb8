mod error;
mod handlers;
mod kakao;
mod link;
mod models;
mod scoring;
mod util;

use actix_web::web;

pub(crate) use handlers::AppState;
pub(crate) use kakao::{KakaoLocalClient, SortMode, MAX_PAGE_SIZE};
pub(crate) use link::DEFAULT_WALK_LINK_BASE;

pub fn configure(cfg: &mut web::ServiceConfig) {
    handlers::configure(cfg);
}
