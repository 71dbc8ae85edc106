mod collaborators;
mod config;
mod error;
mod services;
mod state;
mod store;

use crate::collaborators::analyzer::{Analyzer, HttpAnalyzer, NoAnalyzer};
use crate::collaborators::notifier::LogNotifier;
use crate::config::Config;
use crate::state::AppState;
use crate::store::Store;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{info, warn};
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::load().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let store = Store::open(&config.database).map_err(io::Error::other)?;
    info!("Using database {}", config.database.display());

    let analyzer: Arc<dyn Analyzer> = match &config.analyzer_url {
        Some(url) => Arc::new(
            HttpAnalyzer::new(url.clone(), config.analyzer_key.clone())
                .map_err(io::Error::other)?,
        ),
        None => {
            warn!("TRUSTGRID_ANALYZER_URL not set; scores will be estimated");
            Arc::new(NoAnalyzer)
        }
    };

    let state = AppState {
        store,
        analyzer,
        notifier: Arc::new(LogNotifier),
        public_url: config.public_url.clone(),
        token_ttl: chrono::Duration::hours(config.token_ttl_hours),
    };

    info!("Server running at http://{}:{}", config.host, config.port);

    let json_limit = config.json_limit;
    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(json_limit))
            .app_data(web::Data::new(state.clone()))
            .configure(services::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
