use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

use goldenhand_agents::AgentIntegrator;

mod config;
mod controllers;

use config::Config;

pub struct AppState {
    pub integrator: Arc<AgentIntegrator>,
    pub config: Config,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let host = config.host.clone();
    let port = config.port;

    // Eager initialization: a handler must never observe an empty registry.
    log::info!("Initializing agent integrator");
    let integrator = Arc::new(AgentIntegrator::new());
    integrator.initialize();

    log::info!("Starting The Golden Hand agent server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(AppState {
                integrator: Arc::clone(&integrator),
                config: config.clone(),
            }))
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config_routes)
            .configure(controllers::agents::config_routes)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
