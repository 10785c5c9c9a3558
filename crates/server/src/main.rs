use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use shared::{
    domain::Level,
    error::{ApiError, ApiException, ErrorCode},
    protocol::{generate_route, healthz_route, GenerateResponse},
};
use tracing::{error, info, warn};

mod config;
mod facts;
mod gemini;
mod wikipedia;

use config::{load_settings, obfuscate_key};
use facts::{fake_index, parse_statements, shuffle_facts};
use gemini::{GeminiClient, StatementGenerator};
use wikipedia::{ArticleSource, WikipediaClient};

const USER_AGENT: &str = concat!("fakefact-server/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
struct AppState {
    articles: Arc<dyn ArticleSource>,
    generator: Arc<dyn StatementGenerator>,
}

#[derive(Debug, Deserialize)]
struct GenerateBody {
    #[serde(default)]
    topic: Option<String>,
    #[serde(default)]
    level: Option<Level>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt().with_env_filter("info").init();
    match dotenv {
        Ok(path) => info!(path = %path.display(), ".env loaded"),
        Err(err) => warn!(error = %err, "no .env loaded; using process environment"),
    }

    let settings = load_settings();
    match settings.gemini_api_key.as_deref() {
        Some(key) => info!(key = %obfuscate_key(key), "GEMINI_API_KEY loaded"),
        None => warn!("GEMINI_API_KEY is not set; /generate will fail until it is provided"),
    }

    let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
    let state = AppState {
        articles: Arc::new(WikipediaClient::new(
            http.clone(),
            settings.wikipedia_api_url.clone(),
        )),
        generator: Arc::new(GeminiClient::new(
            http,
            settings.gemini_api_url.clone(),
            settings.gemini_api_key.clone(),
            settings.gemini_model.clone(),
            settings.gemini_temperature,
        )),
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(healthz_route(), get(healthz))
        .route(generate_route(), post(generate))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Upstream => StatusCode::BAD_GATEWAY,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn reject(err: ApiException) -> (StatusCode, Json<ApiError>) {
    (status_for(err.code), Json(ApiError::from(err)))
}

async fn generate(
    State(state): State<Arc<AppState>>,
    body: Result<Json<GenerateBody>, JsonRejection>,
) -> Result<Json<GenerateResponse>, (StatusCode, Json<ApiError>)> {
    let Json(body) = body.map_err(|rejection| {
        reject(ApiException::new(
            ErrorCode::Validation,
            rejection.body_text(),
        ))
    })?;

    let topic = body
        .topic
        .as_deref()
        .map(str::trim)
        .filter(|topic| !topic.is_empty())
        .ok_or_else(|| reject(ApiException::new(ErrorCode::Validation, "Topic is required")))?;
    let level = body.level.unwrap_or_default();

    generate_round(&state, topic, level)
        .await
        .map(Json)
        .map_err(|err| {
            if matches!(err.code, ErrorCode::Internal | ErrorCode::Upstream) {
                error!(topic, %level, error = %err, "generate failed");
            }
            reject(err)
        })
}

async fn generate_round(
    state: &AppState,
    topic: &str,
    level: Level,
) -> Result<GenerateResponse, ApiException> {
    let article = state
        .articles
        .fetch_article(topic)
        .await
        .map_err(|e| ApiException::new(ErrorCode::Internal, e.to_string()))?
        .ok_or_else(|| {
            ApiException::new(
                ErrorCode::NotFound,
                format!("No Wikipedia article found for '{topic}'"),
            )
        })?;

    let raw = state
        .generator
        .generate_statements(&article, level)
        .await
        .map_err(|e| ApiException::new(ErrorCode::Internal, e.to_string()))?;

    let mut facts = parse_statements(&raw);
    if facts.is_empty() {
        return Err(ApiException::new(
            ErrorCode::Upstream,
            "Generated statements could not be parsed",
        ));
    }
    shuffle_facts(&mut facts, &mut rand::thread_rng());
    let fake = fake_index(&facts).ok_or_else(|| {
        ApiException::new(
            ErrorCode::Upstream,
            "Generated statements did not include a fake statement",
        )
    })?;

    info!(topic, %level, facts = facts.len(), "round generated");
    Ok(GenerateResponse {
        topic: topic.to_string(),
        level,
        facts,
        fake_index: fake as i64,
    })
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
