use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use serde::Deserialize;
use std::sync::Arc;
use symptomatch_core::{Catalog, Error};
use symptomatch_similarity::{MatchConfig, Matcher, RankingStrategy, Scorer};
use symptomatch_storage::{CatalogManager, CatalogSource, REQUIRED_COLUMNS};
use tracing::info;

/// Largest accepted catalog upload
const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

#[derive(Deserialize)]
struct MatchRequest {
    symptoms: String,
    top_n: Option<usize>,
    strategy: Option<String>,
    scorer: Option<String>,
    floor: Option<f32>,
}

impl MatchRequest {
    fn config(&self, defaults: &MatchConfig) -> Result<MatchConfig, String> {
        let mut config = *defaults;
        if let Some(strategy) = &self.strategy {
            config.strategy = strategy.parse::<RankingStrategy>().map_err(|e| e.to_string())?;
        }
        if let Some(scorer) = &self.scorer {
            config.scorer = scorer.parse::<Scorer>().map_err(|e| e.to_string())?;
        }
        if let Some(top_n) = self.top_n {
            config.top_n = Some(top_n);
        }
        if let Some(floor) = self.floor {
            config.floor = floor;
        }
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }
}

#[derive(Deserialize)]
struct UploadParams {
    name: Option<String>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(
        manager: Arc<CatalogManager>,
        defaults: MatchConfig,
        port: u16,
    ) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            let manager = manager.clone();
            App::new()
                .wrap(cors)
                .configure(|cfg| Self::configure(cfg, manager, defaults))
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }

    /// Register state and routes; shared by the server and tests
    pub fn configure(cfg: &mut web::ServiceConfig, manager: Arc<CatalogManager>, defaults: MatchConfig) {
        cfg.app_data(web::Data::new(manager))
            .app_data(web::Data::new(defaults))
            .app_data(web::PayloadConfig::new(MAX_UPLOAD_BYTES))
            .route("/catalog", web::get().to(get_catalog))
            .route("/catalog/sample", web::get().to(sample_catalog))
            .route("/catalog/upload", web::post().to(upload_catalog))
            .route("/catalog/reload", web::post().to(reload_catalog))
            .route("/match", web::post().to(match_symptoms));
    }
}

fn error_response(e: &Error) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        Error::CatalogUnavailable(_) => HttpResponse::NotFound().json(body),
        Error::TooLarge { .. } => HttpResponse::PayloadTooLarge().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn no_catalog() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "No catalog loaded"
    }))
}

async fn get_catalog(
    manager: web::Data<Arc<CatalogManager>>,
) -> ActixResult<HttpResponse> {
    match manager.info() {
        Some(info) => Ok(HttpResponse::Ok().json(info)),
        None => Ok(no_catalog()),
    }
}

async fn sample_catalog() -> ActixResult<HttpResponse> {
    let catalog = Catalog::sample();
    let rows: Vec<_> = catalog.iter().map(|entry| entry.record()).collect();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "columns": REQUIRED_COLUMNS,
        "rows": rows,
    })))
}

async fn upload_catalog(
    manager: web::Data<Arc<CatalogManager>>,
    params: web::Query<UploadParams>,
    body: web::Bytes,
) -> ActixResult<HttpResponse> {
    let name = params.into_inner().name.unwrap_or_else(|| "upload.csv".to_string());
    info!("Received catalog upload {} ({} bytes)", name, body.len());

    match manager.activate(CatalogSource::upload(name, body.to_vec())) {
        Ok(info) => Ok(HttpResponse::Ok().json(info)),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn reload_catalog(
    manager: web::Data<Arc<CatalogManager>>,
) -> ActixResult<HttpResponse> {
    match manager.reload() {
        Ok(info) => Ok(HttpResponse::Ok().json(info)),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn match_symptoms(
    manager: web::Data<Arc<CatalogManager>>,
    defaults: web::Data<MatchConfig>,
    req: web::Json<MatchRequest>,
) -> ActixResult<HttpResponse> {
    let config = match req.config(&defaults) {
        Ok(config) => config,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "error": e
            })));
        }
    };

    let catalog = match manager.catalog() {
        Some(c) => c,
        None => return Ok(no_catalog()),
    };

    let response = Matcher::new(config).explain(&req.symptoms, &catalog);
    Ok(HttpResponse::Ok().json(response))
}
