use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use dao_portal::client::HttpGovernanceClient;
use dao_portal::config::AppConfig;
use dao_portal::handlers;
use dao_portal::state::AppState;
use dao_portal::tasks;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env();
    let api = HttpGovernanceClient::new(&config)
        .map_err(|e| std::io::Error::other(format!("Failed to build API client: {e}")))?;
    let state = AppState::new(config.clone(), Arc::new(api));

    // Session encryption key, from SESSION_KEY so sessions survive restarts
    let secret_key = match config.session_key.as_deref() {
        Some(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Some(val) => {
            log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
            Key::generate()
        }
        None => {
            log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    let root_tasks = tasks::compose(&state, tasks::default_units()).await;
    log::info!("Background units running: {:?}", root_tasks.names());

    let (host, port) = config.bind_addr();
    log::info!("Starting server at http://{host}:{port}");

    let data = web::Data::new(state);
    let result = HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(false)
        .cookie_http_only(true)
        .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(data.clone())
            .service(actix_files::Files::new("/static", "./static"))
            .configure(handlers::configure)
            .default_service(web::to(handlers::not_found))
    })
    .bind((host.as_str(), port))?
    .run()
    .await;

    root_tasks.shutdown();
    result
}
