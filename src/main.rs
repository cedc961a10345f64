use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};

use proctored_quiz::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let state = match AppState::new(Config::from_env()) {
        Ok(state) => Arc::new(state),
        Err(err) => {
            log::error!("Failed to initialise quiz state: {}", err);
            return Err(std::io::Error::other(err.to_string()));
        }
    };

    let host = state.config.web_server_host.clone();
    let port = state.config.web_server_port;

    log::info!(
        "Serving {}-question quiz on http://{}:{}",
        state.bank.count(),
        host,
        port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
