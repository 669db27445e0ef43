//! Single binary web server: assets from ASSET_ROOT, draft API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:3000 by default.
//! Override with env: HOST, PORT, ASSET_ROOT, DRAFT_IDLE_HOURS, CLEANUP_INTERVAL_MINUTES.

use actix_session::{storage::CookieSessionStore, SessionMiddleware};
use actix_web::{cookie::Key, middleware, web::Data, App, HttpServer};
use std::collections::HashMap;
use std::sync::RwLock;
use team_draft_web::{
    api::{self, AssetRoot, DraftStore},
    ServerConfig,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    log::info!("Serving assets from {}", config.asset_root.display());
    log::info!("Press Ctrl+C to stop the server");

    let state: Data<DraftStore> = Data::new(RwLock::new(HashMap::new()));
    let asset_root = Data::new(AssetRoot(config.asset_root.clone()));
    // Per-process signing key: sessions end with the process, like the drafts.
    let session_key = Key::generate();

    // Background task: periodically remove drafts nobody has touched within the idle timeout
    let state_cleanup = state.clone();
    let inactivity_timeout = config.inactivity_timeout;
    let cleanup_interval = config.cleanup_interval;
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(cleanup_interval);
        loop {
            interval.tick().await;
            let removed = api::remove_idle_drafts(&state_cleanup, inactivity_timeout);
            if removed > 0 {
                log::info!(
                    "Cleaned up {} inactive draft(s) (no activity for {:?})",
                    removed,
                    inactivity_timeout
                );
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .app_data(state.clone())
            .app_data(asset_root.clone())
            .configure(api::configure)
    })
    .bind(bind)?
    .run()
    .await
}
