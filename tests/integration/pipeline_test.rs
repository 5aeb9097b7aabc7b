//! End-to-end pipeline runs against mock HTTP APIs

mod common;

use std::time::Duration;

use artpost_app::{run_pipeline, PipelineSettings, Services, Step};
use artpost_common::{ApiError, Deadline};
use common::{chat_ok, image_ok, media_ok, TestApis, ACCOUNT_ID};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, ResponseTemplate,
};

fn deadline() -> Deadline {
    Deadline::after(Duration::from_secs(10))
}

#[tokio::test]
async fn test_full_pipeline_posts_image() {
    let apis = TestApis::start().await;
    apis.mount_chat(chat_ok("a neon jellyfish")).await;
    apis.mount_images(image_ok("http://x/img.png"), 1).await;

    // The created id must reach the publish call unchanged.
    Mock::given(method("POST"))
        .and(path(format!("/v15.0/{}/media", ACCOUNT_ID)))
        .and(query_param("access_token", "ig-test"))
        .and(query_param("image_url", "http://x/img.png"))
        .and(query_param("caption", "Prompt: a neon jellyfish"))
        .respond_with(media_ok("123"))
        .expect(1)
        .mount(&apis.server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/v15.0/{}/media_publish", ACCOUNT_ID)))
        .and(query_param("creation_id", "123"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":"999"}"#))
        .expect(1)
        .mount(&apis.server)
        .await;

    let services = Services::from_config(&apis.config()).unwrap();
    let report = run_pipeline(&services, &PipelineSettings::default(), &deadline())
        .await
        .unwrap();

    assert_eq!(report.prompt, "a neon jellyfish");
    assert_eq!(report.encoded_image_url, "http%3A%2F%2Fx%2Fimg.png");
    assert_eq!(report.media_id, "123");
}

#[tokio::test]
async fn test_chat_failure_halts_pipeline() {
    let apis = TestApis::start().await;
    apis.mount_chat(ResponseTemplate::new(503)).await;
    apis.mount_images(image_ok("http://x/img.png"), 0).await;
    apis.mount_create(media_ok("123"), 0).await;
    apis.mount_publish(ResponseTemplate::new(200), 0).await;

    let services = Services::from_config(&apis.config()).unwrap();
    let err = run_pipeline(&services, &PipelineSettings::default(), &deadline())
        .await
        .unwrap_err();

    assert_eq!(err.step, Step::GeneratePrompt);
    assert_eq!(err.source.status(), Some(503));
}

#[tokio::test]
async fn test_empty_image_data_halts_pipeline() {
    let apis = TestApis::start().await;
    apis.mount_chat(chat_ok("a neon jellyfish")).await;
    apis.mount_images(
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": []})),
        1,
    )
    .await;
    apis.mount_create(media_ok("123"), 0).await;
    apis.mount_publish(ResponseTemplate::new(200), 0).await;

    let services = Services::from_config(&apis.config()).unwrap();
    let err = run_pipeline(&services, &PipelineSettings::default(), &deadline())
        .await
        .unwrap_err();

    assert_eq!(err.step, Step::GenerateImage);
    assert!(matches!(err.source, ApiError::EmptyResult(_)));
}

#[tokio::test]
async fn test_create_failure_never_publishes() {
    let apis = TestApis::start().await;
    apis.mount_chat(chat_ok("a neon jellyfish")).await;
    apis.mount_images(image_ok("http://x/img.png"), 1).await;
    apis.mount_create(
        ResponseTemplate::new(400).set_body_string(r#"{"error":{"message":"Invalid parameter"}}"#),
        1,
    )
    .await;
    apis.mount_publish(ResponseTemplate::new(200), 0).await;

    let services = Services::from_config(&apis.config()).unwrap();
    let err = run_pipeline(&services, &PipelineSettings::default(), &deadline())
        .await
        .unwrap_err();

    assert_eq!(err.step, Step::CreateMedia);
    assert!(err.to_string().contains("Invalid parameter"));
}

#[tokio::test]
async fn test_publish_500_halts_without_parsing_body() {
    let apis = TestApis::start().await;
    apis.mount_chat(chat_ok("a neon jellyfish")).await;
    apis.mount_images(image_ok("http://x/img.png"), 1).await;
    apis.mount_create(media_ok("123"), 1).await;
    apis.mount_publish(ResponseTemplate::new(500).set_body_string("<html>oops"), 1)
        .await;

    let services = Services::from_config(&apis.config()).unwrap();
    let err = run_pipeline(&services, &PipelineSettings::default(), &deadline())
        .await
        .unwrap_err();

    assert_eq!(err.step, Step::PublishMedia);
    assert!(matches!(err.source, ApiError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_slow_image_api_exceeds_deadline() {
    let apis = TestApis::start().await;
    apis.mount_chat(chat_ok("a neon jellyfish")).await;
    apis.mount_images(
        image_ok("http://x/img.png").set_delay(Duration::from_secs(5)),
        1,
    )
    .await;
    apis.mount_create(media_ok("123"), 0).await;

    let services = Services::from_config(&apis.config()).unwrap();
    let err = run_pipeline(
        &services,
        &PipelineSettings::default(),
        &Deadline::after(Duration::from_millis(500)),
    )
    .await
    .unwrap_err();

    assert_eq!(err.step, Step::GenerateImage);
    assert!(matches!(err.source, ApiError::DeadlineExceeded(_)));
}

#[tokio::test]
async fn test_mock_providers_make_a_dry_run() {
    let apis = TestApis::start().await;
    let mut config = apis.config();
    config.llm_provider = "mock".to_string();
    config.image_provider = "mock".to_string();
    config.social_provider = "mock".to_string();

    let services = Services::from_config(&config).unwrap();
    let report = run_pipeline(&services, &PipelineSettings::default(), &deadline())
        .await
        .unwrap();

    assert!(!report.prompt.is_empty());
    assert!(!report.media_id.is_empty());
    assert!(apis.server.received_requests().await.unwrap().is_empty());
}
