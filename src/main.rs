mod errors;
mod handlers;
mod initialization;
mod logging;
mod manager_dashboard;
mod manager_db;
mod manager_forecast;
mod manager_owm;

use std::sync::Arc;
use actix_web::{web, App, HttpServer};
use log::info;
use crate::errors::UnrecoverableError;
use crate::initialization::config;
use crate::manager_db::CredentialDB;
use crate::manager_owm::OpenWeatherMap;

pub struct AppState {
    db: Arc<CredentialDB>,
    owm: OpenWeatherMap,
    icon_base_url: String,
    days: usize,
    default_city: String,
}

#[actix_web::main]
async fn main() -> Result<(), UnrecoverableError> {
    let config = config()?;

    let state = web::Data::new(AppState {
        db: Arc::new(CredentialDB::new(&config.db.db_path)?),
        owm: OpenWeatherMap::new(&config.owm.base_url, config.owm.timeout_secs)?,
        icon_base_url: config.owm.icon_base_url,
        days: config.forecast.days,
        default_city: config.forecast.default_city,
    });

    info!("listening on {}:{}", config.web_server.bind_address, config.web_server.bind_port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(handlers::routes)
    })
        .bind((config.web_server.bind_address, config.web_server.bind_port))?
        .run()
        .await?;

    Ok(())
}
