use actix_web::{test, web, App};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use local_business_finder::config::{Config, SecretsConfig};
use local_business_finder::{routes, AppState};

const GENERATE_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

fn config_for(tavily: &MockServer, gemini: &MockServer) -> Config {
    let mut config = Config::with_secrets(SecretsConfig {
        gemini_api_key: "gemini-key".to_string(),
        tavily_api_key: "tavily-key".to_string(),
        bearer_token: "right-token".to_string(),
    });
    config.search.api_url = format!("{}/search", tavily.uri());
    config.search.timeout_secs = 5;
    config.generation.base_url = gemini.uri();
    config.generation.timeout_secs = 5;
    config
}

fn tool_call(tool: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tools/call",
        "params": { "name": tool, "arguments": arguments }
    })
}

#[actix_web::test]
async fn health_check() {
    let tavily = MockServer::start().await;
    let gemini = MockServer::start().await;
    let state = AppState::new(config_for(&tavily, &gemini)).unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body, json!({ "status": "MCP Server Running" }));
}

#[actix_web::test]
async fn unknown_route_is_not_found() {
    let tavily = MockServer::start().await;
    let gemini = MockServer::start().await;
    let state = AppState::new(config_for(&tavily, &gemini)).unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/nope").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn find_local_business_end_to_end() {
    let tavily = MockServer::start().await;
    let gemini = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_partial_json(json!({
            "api_key": "tavily-key",
            "query": "plumbers near downtown",
            "search_depth": "basic",
            "max_results": 10
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                { "title": "Joe's Plumbing", "url": "http://joe.example", "content": "24/7 service" }
            ]
        })))
        .expect(1)
        .mount(&tavily)
        .await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "1. Joe's Plumbing (http://joe.example)" }] },
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&gemini)
        .await;

    let state = AppState::new(config_for(&tavily, &gemini)).unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/mcp")
        .set_json(tool_call(
            "find_local_business",
            json!({ "query": "plumbers near downtown" }),
        ))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body["result"]["structuredContent"],
        json!({ "results": "1. Joe's Plumbing (http://joe.example)" })
    );

    let requests = gemini.received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = sent["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("plumbers near downtown"));
    assert!(prompt.contains("Joe's Plumbing - 24/7 service (http://joe.example)"));
}

#[actix_web::test]
async fn empty_search_never_calls_generation() {
    let tavily = MockServer::start().await;
    let gemini = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .mount(&tavily)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&gemini)
        .await;

    let state = AppState::new(config_for(&tavily, &gemini)).unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/mcp")
        .set_json(tool_call("find_local_business", json!({ "query": "unicorn farriers" })))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["result"]["isError"], json!(false));
    assert_eq!(
        body["result"]["structuredContent"],
        json!({ "error": "No results found" })
    );
}

#[actix_web::test]
async fn search_outage_is_a_tool_error() {
    let tavily = MockServer::start().await;
    let gemini = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&tavily)
        .await;

    let state = AppState::new(config_for(&tavily, &gemini)).unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/mcp")
        .set_json(tool_call("find_local_business", json!({ "query": "bakeries" })))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["result"]["isError"], json!(true));
    assert!(body["result"]["content"][0]["text"]
        .as_str()
        .unwrap()
        .contains("503"));
}

#[actix_web::test]
async fn validate_tool() {
    let tavily = MockServer::start().await;
    let gemini = MockServer::start().await;
    let state = AppState::new(config_for(&tavily, &gemini)).unwrap();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/mcp")
        .set_json(tool_call("validate", json!({ "token": "right-token" })))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body["result"]["structuredContent"],
        json!({ "phone": "919876543210" })
    );

    let req = test::TestRequest::post()
        .uri("/mcp")
        .set_json(tool_call("validate", json!({ "token": "wrong-token" })))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["result"]["isError"], json!(true));
}
