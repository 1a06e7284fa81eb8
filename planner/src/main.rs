mod api;
mod config;

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::{Builder, Env};

use api::{AppState, KakaoLocalClient};
use config::AppConfig;

fn init_logging() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let config =
        AppConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    if config.kakao_api_key.is_none() {
        log::warn!("KAKAO_REST_API_KEY is not set; /api/recommend will answer 500 until it is");
    }

    let client = KakaoLocalClient::new(
        config.kakao_base_url.clone(),
        config.kakao_api_key.clone(),
        config.search_timeout,
    )
    .map_err(io::Error::other)?;

    let state = AppState {
        search: Arc::new(client),
        map_link_base: config.map_link_base.clone(),
        page_size: config.page_size,
        max_pages: config.max_pages,
        sort: config.sort,
        selection_seed: config.selection_seed,
    };

    log::info!("Planner starting on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(api::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
