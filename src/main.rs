use std::time::Duration;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use persona_interview_server::{
    app_state::AppState, config::Config, handlers, middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if let Err(err) = config.require_api_key() {
        log::error!("{}", err);
        std::process::exit(1);
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(err) => {
            log::error!("Failed to initialise application state: {}", err);
            std::process::exit(1);
        }
    };

    log::info!(
        "Starting HTTP server on {}:{} (model={})",
        host,
        port,
        state.config.model_name
    );

    let idle_ttl = state.config.session_idle_ttl_secs;
    let data = web::Data::new(state);

    let max_idle = chrono::Duration::from_std(Duration::from_secs(idle_ttl)).ok();
    if let Some(max_idle) = max_idle.filter(|_| idle_ttl > 0) {
        let sessions = data.session_service.clone();
        actix_web::rt::spawn(async move {
            let mut ticker = actix_web::rt::time::interval(Duration::from_secs(60));
            loop {
                ticker.tick().await;
                if let Err(err) = sessions.prune_idle_sessions(max_idle).await {
                    log::warn!("Idle session sweep failed: {}", err);
                }
            }
        });
    }

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .wrap(RequestIdMiddleware)
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
