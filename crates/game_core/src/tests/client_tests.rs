use super::*;
use axum::{http::StatusCode, routing::post, Json, Router};
use shared::domain::{Fact, Level};
use tokio::net::TcpListener;

use crate::{
    error::NETWORK_ERROR_MESSAGE,
    session::{GameSession, GuessOutcome},
};

async fn spawn_server(app: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

async fn echo_round(Json(req): Json<GenerateRequest>) -> Json<GenerateResponse> {
    Json(GenerateResponse {
        topic: req.topic,
        level: req.level,
        facts: vec![
            Fact::new("first", true),
            Fact::new("second", false),
            Fact::new("third", true),
        ],
        fake_index: 1,
    })
}

fn rome_request() -> GenerateRequest {
    GenerateRequest {
        topic: "Rome".to_string(),
        level: Level::Easy,
    }
}

#[test]
fn endpoint_is_joined_onto_server_url() {
    let service = HttpFactService::new("http://127.0.0.1:5000").expect("url");
    assert_eq!(service.endpoint().as_str(), "http://127.0.0.1:5000/generate");

    assert!(HttpFactService::new("not a url").is_err());
}

#[tokio::test]
async fn generate_decodes_successful_round() {
    let server_url = spawn_server(Router::new().route("/generate", post(echo_round))).await;
    let service = HttpFactService::new(&server_url).expect("url");

    let res = service.generate(&rome_request()).await.expect("round");
    assert_eq!(res.topic, "Rome");
    assert_eq!(res.level, Level::Easy);
    assert_eq!(res.facts.len(), 3);
    assert_eq!(res.fake_index, 1);
}

#[tokio::test]
async fn generate_maps_error_payload_to_service_error() {
    let app = Router::new().route(
        "/generate",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "rate limited" })),
            )
        }),
    );
    let service = HttpFactService::new(&spawn_server(app).await).expect("url");

    let err = service
        .generate(&rome_request())
        .await
        .expect_err("must fail");
    assert_eq!(
        err,
        GenerateError::service(500, Some("rate limited".to_string()))
    );
    assert_eq!(err.user_message(), "Error generating facts: rate limited");
}

#[tokio::test]
async fn generate_without_error_field_falls_back_to_generic_message() {
    let app = Router::new().route(
        "/generate",
        post(|| async { (StatusCode::BAD_GATEWAY, Json(serde_json::json!({}))) }),
    );
    let service = HttpFactService::new(&spawn_server(app).await).expect("url");

    let err = service
        .generate(&rome_request())
        .await
        .expect_err("must fail");
    assert_eq!(err, GenerateError::service(502, None));
    assert_eq!(
        err.user_message(),
        "Error generating facts: Unknown API error."
    );
}

#[tokio::test]
async fn generate_treats_empty_error_text_as_missing() {
    for payload in [
        serde_json::json!({ "error": "" }),
        serde_json::json!({ "error": null }),
    ] {
        let app = Router::new().route(
            "/generate",
            post(move || async move { (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)) }),
        );
        let service = HttpFactService::new(&spawn_server(app).await).expect("url");

        let err = service
            .generate(&rome_request())
            .await
            .expect_err("must fail");
        assert_eq!(err, GenerateError::service(500, None));
        assert_eq!(
            err.user_message(),
            "Error generating facts: Unknown API error."
        );
    }
}

#[tokio::test]
async fn generate_renders_non_string_error_value() {
    let app = Router::new().route(
        "/generate",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": 429 })),
            )
        }),
    );
    let service = HttpFactService::new(&spawn_server(app).await).expect("url");

    let err = service
        .generate(&rome_request())
        .await
        .expect_err("must fail");
    assert_eq!(err, GenerateError::service(500, Some("429".to_string())));
    assert_eq!(err.user_message(), "Error generating facts: 429");
}

#[tokio::test]
async fn generate_treats_non_json_body_as_transport_failure() {
    let app = Router::new().route(
        "/generate",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>") }),
    );
    let service = HttpFactService::new(&spawn_server(app).await).expect("url");

    let err = service
        .generate(&rome_request())
        .await
        .expect_err("must fail");
    assert!(matches!(err, GenerateError::Transport(_)), "{err:?}");
    assert_eq!(err.user_message(), NETWORK_ERROR_MESSAGE);
}

#[tokio::test]
async fn generate_reports_refused_connection_as_transport_failure() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let service = HttpFactService::new(&format!("http://{addr}")).expect("url");
    let err = service
        .generate(&rome_request())
        .await
        .expect_err("must fail");
    assert!(matches!(err, GenerateError::Transport(_)), "{err:?}");
}

#[tokio::test]
async fn rome_scenario_plays_through_session() {
    let server_url = spawn_server(Router::new().route("/generate", post(echo_round))).await;
    let service = HttpFactService::new(&server_url).expect("url");
    let mut session = GameSession::new();

    let request = session
        .submit_configuration("Rome", Level::Easy)
        .expect("request");
    session.complete_generation(service.generate(&request).await);
    assert!(session.select_fact(1));
    assert_eq!(session.submit_guess(), Some(GuessOutcome::Correct));
}
