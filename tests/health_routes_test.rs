mod common;

use actix_web::test;
use serde_json::Value;

use common::{InMemoryRepository, TestApp};

#[actix_rt::test]
async fn test_liveness_endpoint() {
    let test_app = TestApp::new("http://127.0.0.1:9/unused");
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, actix_web::web::Bytes::from_static(b"OK"));
}

#[actix_rt::test]
async fn test_health_reports_services() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("HEAD", "/")
        .with_status(405)
        .create_async()
        .await;

    let test_app = TestApp::new(&server.url());
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["services"]["database"]["status"], "ok");
    assert_eq!(body["services"]["completion_api"]["status"], "ok");
}

#[actix_rt::test]
async fn test_health_degrades_when_database_is_down() {
    let test_app =
        TestApp::with_repository(InMemoryRepository::unavailable(), "http://127.0.0.1:9/unused");
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"]["database"]["status"], "error");
}

#[actix_rt::test]
async fn test_health_degrades_when_completion_api_is_unreachable() {
    let test_app = TestApp::new("http://127.0.0.1:9/unused");
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"]["database"]["status"], "ok");
    assert_eq!(body["services"]["completion_api"]["status"], "error");
}
