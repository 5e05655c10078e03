use actix_web::http::StatusCode;
use actix_web::{get, put, web, HttpResponse, Responder};
use log::{error, info};
use serde::{Deserialize, Serialize};
use crate::AppState;
use crate::manager_dashboard::{fetch_dashboard, Dashboard, DashboardError};
use crate::manager_db::CredentialStore;
use crate::manager_forecast::models::{DailySummary, WeatherCondition};
use crate::manager_owm::icon_url;
use crate::manager_owm::models::CurrentConditions;

#[derive(Deserialize, Debug)]
struct WeatherQuery {
    city: Option<String>,
}

#[derive(Deserialize)]
struct CredentialBody {
    api_key: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct CredentialStatus {
    configured: bool,
}

#[derive(Serialize)]
struct WithIcon<'a, T> {
    #[serde(flatten)]
    inner: &'a T,
    icon_url: String,
}

#[derive(Serialize)]
struct DashboardView<'a> {
    city: &'a str,
    country: &'a str,
    current: WithIcon<'a, CurrentConditions>,
    days: Vec<WithIcon<'a, DailySummary>>,
}

impl<'a> DashboardView<'a> {
    fn new(dashboard: &'a Dashboard, icon_base_url: &str) -> Self {
        let with_icon = |condition: &WeatherCondition| icon_url(icon_base_url, &condition.icon);

        DashboardView {
            city: &dashboard.city,
            country: &dashboard.country,
            current: WithIcon {
                inner: &dashboard.current,
                icon_url: with_icon(&dashboard.current.condition),
            },
            days: dashboard.days.iter()
                .map(|d| WithIcon { inner: d, icon_url: with_icon(&d.condition) })
                .collect(),
        }
    }
}

fn error_response(status: StatusCode, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorBody { error: message })
}

fn status_for(e: &DashboardError) -> StatusCode {
    match e {
        DashboardError::EmptyCity => StatusCode::BAD_REQUEST,
        DashboardError::MissingCredential => StatusCode::PRECONDITION_REQUIRED,
        DashboardError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        DashboardError::Remote(_) => StatusCode::BAD_GATEWAY,
    }
}

// city=London
#[get("/weather")]
async fn weather(params: web::Query<WeatherQuery>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    let city = params.city.as_deref().unwrap_or(&data.default_city);

    match fetch_dashboard(&*data.db, &data.owm, city, data.days).await {
        Ok(dashboard) => HttpResponse::Ok().json(DashboardView::new(&dashboard, &data.icon_base_url)),
        Err(e) => {
            error!("failed to fetch weather for {}: {}", city, e);
            error_response(status_for(&e), e.to_string())
        }
    }
}

#[get("/credential")]
async fn credential_status(data: web::Data<AppState>) -> impl Responder {
    match data.db.get_credential() {
        Ok(key) => HttpResponse::Ok().json(CredentialStatus { configured: key.is_some() }),
        Err(e) => {
            error!("failed to read credential: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

#[put("/credential")]
async fn set_credential(body: web::Json<CredentialBody>, data: web::Data<AppState>) -> impl Responder {
    if body.api_key.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "API key must not be empty".to_string());
    }

    match data.db.set_credential(&body.api_key) {
        Ok(_) => {
            info!("API key updated");
            HttpResponse::NoContent().finish()
        },
        Err(e) => {
            error!("failed to store credential: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(weather)
        .service(credential_status)
        .service(set_credential);
}
