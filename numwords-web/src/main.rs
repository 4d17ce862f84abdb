use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use numwords::{ConvertError, Converter, LocaleRegistry};

#[derive(Serialize, Deserialize)]
pub struct FromNumberRequest {
    pub number: String,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub separator: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct FromNumberResponse {
    pub words: String,
    pub locale: String,
}

#[derive(Serialize, Deserialize)]
pub struct ToNumberRequest {
    pub words: String,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub separator: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ToNumberResponse {
    pub number: String,
    pub locale: String,
}

#[derive(Serialize, Deserialize)]
pub struct LocalesResponse {
    pub locales: Vec<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<LocaleRegistry>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let registry = match env::var_os("NUMWORDS_LOCALES_DIR") {
        Some(dir) => LocaleRegistry::with_dir(&PathBuf::from(dir)),
        None => LocaleRegistry::builtin(),
    }
    .map_err(|e| format!("Failed to load locales: {}", e))?;

    info!(
        "🔢 Starting numwords web server with locales: {}",
        registry.available_locales().join(", ")
    );

    let state = AppState {
        registry: Arc::new(registry),
    };
    let app = app(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = env::var("NUMWORDS_WEB_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 Server running at http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/locales", get(list_locales))
        .route("/api/from-number", post(from_number))
        .route("/api/to-number", post(to_number))
        .with_state(state)
}

fn error_response(error: ConvertError) -> ApiError {
    let status = match &error {
        ConvertError::UnknownLocale { .. } => StatusCode::NOT_FOUND,
        ConvertError::LoadError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    };
    warn!("Conversion failed: {}", error);
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

fn converter_for(
    state: &AppState,
    locale: Option<&str>,
    separator: Option<&str>,
) -> Result<Converter, ApiError> {
    state
        .registry
        .converter(locale.unwrap_or("en"), separator.unwrap_or("."))
        .map_err(error_response)
}

async fn list_locales(State(state): State<AppState>) -> Json<LocalesResponse> {
    Json(LocalesResponse {
        locales: state.registry.available_locales(),
    })
}

async fn from_number(
    State(state): State<AppState>,
    Json(request): Json<FromNumberRequest>,
) -> Result<Json<FromNumberResponse>, ApiError> {
    let converter = converter_for(
        &state,
        request.locale.as_deref(),
        request.separator.as_deref(),
    )?;
    let words = converter
        .from_number(&request.number)
        .map_err(error_response)?;

    info!(
        "Converted {} → {} ({})",
        &request.number,
        &words,
        converter.locale()
    );

    Ok(Json(FromNumberResponse {
        words,
        locale: converter.locale().to_string(),
    }))
}

async fn to_number(
    State(state): State<AppState>,
    Json(request): Json<ToNumberRequest>,
) -> Result<Json<ToNumberResponse>, ApiError> {
    let converter = converter_for(
        &state,
        request.locale.as_deref(),
        request.separator.as_deref(),
    )?;
    let number = converter.to_number(&request.words).map_err(error_response)?;

    info!(
        "Converted {} → {} ({})",
        &request.words,
        &number,
        converter.locale()
    );

    Ok(Json(ToNumberResponse {
        number,
        locale: converter.locale().to_string(),
    }))
}
