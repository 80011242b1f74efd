use anyhow::Result;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use trainer_link::api::{FetchError, HttpSource, MockApi};

fn api_for(server: &MockServer) -> Result<MockApi> {
    let source = HttpSource::new(server.uri(), Some(Duration::from_secs(5)))?;
    Ok(MockApi::new(Arc::new(source)))
}

#[tokio::test]
async fn test_collections_are_fetched_once() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/workouts.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "w1", "id_aluno": "s1", "name": "Legs", "status": "pendente"},
            {"id": "w2", "id_aluno": "s2", "name": "Back", "status": "concluído"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server)?;
    let first = api.workouts_of("s1").await?;
    let second = api.workouts_of("s2").await?;

    assert_eq!(first.len(), 1);
    assert!(!first[0].is_done());
    assert!(second[0].is_done());
    Ok(())
}

#[tokio::test]
async fn test_server_error_is_reported_with_status() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let api = api_for(&server)?;
    match api.users().await {
        Err(FetchError::Status { resource, status, reason }) => {
            assert_eq!(resource, "users");
            assert_eq!(status, 500);
            assert_eq!(reason, "boom");
        }
        other => panic!("unexpected result: {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_missing_resource_is_not_found() -> Result<()> {
    let server = MockServer::start().await;

    let api = api_for(&server)?;
    let result = api.meal_plan_of("s1").await;

    assert_eq!(result, Err(FetchError::NotFound("mealPlans".to_string())));
    Ok(())
}

#[tokio::test]
async fn test_failed_fetch_is_retried_on_next_call() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/agenda.json"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/agenda.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let api = api_for(&server)?;
    assert!(api.agenda_of("s1").await.is_err());
    assert!(api.agenda_of("s1").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chat.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let api = api_for(&server)?;
    assert!(matches!(api.chat_of("s1").await, Err(FetchError::Decode { .. })));
    Ok(())
}
