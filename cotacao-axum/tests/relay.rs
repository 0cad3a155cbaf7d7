use axum::http::StatusCode;
use axum_test::{TestServer, TestServerConfig};
use cotacao_axum::{ApiApplication, config::AxumConfig, router, upstream::Upstream};
use cotacao_core::ports::PriceRepository as _;
use cotacao_sqlite::{Db, config::SqliteConfig};
use rstest::rstest;
use std::{future::IntoFuture as _, net::TcpListener, time::Duration};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

mod app;
use app::{TestApp, UnavailableApp};

const QUOTE_PATH: &str = "/json/last/USD-BRL";

const UPSTREAM_BODY: &str = r#"{"USDBRL":{"code":"USD","codein":"BRL","name":"Dólar Americano/Real Brasileiro","high":"5.4512","low":"5.4011","varBid":"0.0123","pctChange":"0.23","bid":"5.4321","ask":"5.4331","timestamp":"1718049599","create_date":"2024-06-10 16:59:59"}}"#;

async fn upstream(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUOTE_PATH))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

// Deadlines loose enough that a busy CI machine does not trip them by accident
fn relaxed_config(upstream_uri: &str) -> AxumConfig {
    AxumConfig {
        upstream_url: format!("{upstream_uri}{QUOTE_PATH}"),
        upstream_timeout: Duration::from_secs(2),
        persist_timeout: Duration::from_secs(1),
        ..AxumConfig::default()
    }
}

fn test_server<T: ApiApplication>(app: T, config: AxumConfig) -> TestServer {
    let upstream = Upstream::new(&config).unwrap();
    TestServer::new(router(app, upstream, config)).unwrap()
}

async fn sqlite_app() -> TestApp {
    TestApp(Db::open(&SqliteConfig::default()).await.unwrap())
}

#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 2))]
async fn test_relays_upstream_body_and_records_price() {
    let mock = upstream(ResponseTemplate::new(200).set_body_string(UPSTREAM_BODY)).await;
    let app = sqlite_app().await;
    let server = test_server(app.clone(), relaxed_config(&mock.uri()));

    let response = server.get("/cotacao").await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "application/json");
    assert_eq!(response.text(), UPSTREAM_BODY);

    let records = app.0.recent_prices(10).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].price, 5.4321);
}

#[rstest]
#[case::not_json("<html>upstream hiccup</html>")]
#[case::missing_pair(r#"{"EURBRL":{"bid":"6.01"}}"#)]
#[case::bad_bid(r#"{"USDBRL":{"bid":"N/A"}}"#)]
#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 2))]
async fn test_unreadable_bid_is_recorded_as_zero(#[case] body: &'static str) {
    let mock = upstream(ResponseTemplate::new(200).set_body_string(body)).await;
    let app = sqlite_app().await;
    let server = test_server(app.clone(), relaxed_config(&mock.uri()));

    let response = server.get("/cotacao").await;

    response.assert_status_ok();
    assert_eq!(response.text(), body);

    let records = app.0.recent_prices(10).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].price, 0.0);
}

#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 2))]
async fn test_slow_upstream_yields_gateway_timeout() {
    let mock = upstream(
        ResponseTemplate::new(200)
            .set_body_string(UPSTREAM_BODY)
            .set_delay(Duration::from_millis(800)),
    )
    .await;
    let app = sqlite_app().await;
    let config = AxumConfig {
        upstream_timeout: Duration::from_millis(200),
        ..relaxed_config(&mock.uri())
    };
    let server = test_server(app.clone(), config);

    let response = server.get("/cotacao").await;

    response.assert_status(StatusCode::GATEWAY_TIMEOUT);
    response.assert_text("Request timed out");
    assert!(app.0.recent_prices(10).await.unwrap().is_empty());
}

#[rstest]
#[case(StatusCode::NOT_FOUND)]
#[case(StatusCode::TOO_MANY_REQUESTS)]
#[case(StatusCode::INTERNAL_SERVER_ERROR)]
#[case(StatusCode::SERVICE_UNAVAILABLE)]
#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 2))]
async fn test_upstream_status_is_propagated(#[case] status: StatusCode) {
    let mock = upstream(ResponseTemplate::new(status.as_u16()).set_body_string("upstream detail")).await;
    let app = sqlite_app().await;
    let server = test_server(app.clone(), relaxed_config(&mock.uri()));

    let response = server.get("/cotacao").await;

    response.assert_status(status);
    response.assert_text("Failed to fetch data");
    assert!(app.0.recent_prices(10).await.unwrap().is_empty());
}

#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 2))]
async fn test_unreachable_upstream_is_internal_error() {
    // Nothing listens on the port once the listener is gone
    let uri = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };
    let app = sqlite_app().await;
    let server = test_server(app.clone(), relaxed_config(&uri));

    let response = server.get("/cotacao").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert!(app.0.recent_prices(10).await.unwrap().is_empty());
}

#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 2))]
async fn test_sink_failure_does_not_change_the_answer() {
    let mock = upstream(ResponseTemplate::new(200).set_body_string(UPSTREAM_BODY)).await;
    let app = UnavailableApp::default();
    let server = test_server(app.clone(), relaxed_config(&mock.uri()));

    let response = server.get("/cotacao").await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "application/json");
    assert_eq!(response.text(), UPSTREAM_BODY);

    // the insert was still attempted, exactly once
    assert_eq!(*app.0.attempts.lock().unwrap(), vec![5.4321]);
}

#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 2))]
async fn test_persist_deadline_is_enforced_independently() {
    let mock = upstream(ResponseTemplate::new(200).set_body_string(UPSTREAM_BODY)).await;
    let app = sqlite_app().await;
    let config = AxumConfig {
        persist_timeout: Duration::from_millis(10),
        ..relaxed_config(&mock.uri())
    };
    let server = test_server(app.clone(), config);

    // Keep the single writer connection busy so the insert misses its 10ms
    let held = app.0.writer.acquire().await.unwrap();
    let response = server.get("/cotacao").await;
    drop(held);

    response.assert_status_ok();
    assert_eq!(response.text(), UPSTREAM_BODY);
    assert!(app.0.recent_prices(10).await.unwrap().is_empty());
}

#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 2))]
async fn test_concurrent_requests_each_record_once() {
    let mock = upstream(ResponseTemplate::new(200).set_body_string(UPSTREAM_BODY)).await;
    let app = sqlite_app().await;
    let server = test_server(app.clone(), relaxed_config(&mock.uri()));

    let (a, b, c, d) = tokio::join!(
        server.get("/cotacao").into_future(),
        server.get("/cotacao").into_future(),
        server.get("/cotacao").into_future(),
        server.get("/cotacao").into_future(),
    );
    for response in [a, b, c, d] {
        response.assert_status_ok();
    }

    let records = app.0.recent_prices(10).await.unwrap();
    assert_eq!(records.len(), 4);
    assert!(records.iter().all(|record| record.price == 5.4321));
}

#[test_log::test(tokio::test(flavor = "multi_thread", worker_threads = 2))]
async fn test_caller_hanging_up_does_not_cancel_the_record() {
    let mock = upstream(
        ResponseTemplate::new(200)
            .set_body_string(UPSTREAM_BODY)
            .set_delay(Duration::from_millis(300)),
    )
    .await;
    let app = sqlite_app().await;
    let config = relaxed_config(&mock.uri());
    let upstream = Upstream::new(&config).unwrap();

    // A real socket, so the caller can actually go away mid-request
    let server = TestServer::new_with_config(
        router(app.clone(), upstream, config),
        TestServerConfig {
            transport: Some(axum_test::Transport::HttpRandomPort),
            ..Default::default()
        },
    )
    .unwrap();
    let url = format!("{}cotacao", server.server_address().unwrap().as_str());

    let caller = reqwest::Client::builder()
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let result = caller.get(&url).send().await;
    assert!(result.is_err_and(|err| err.is_timeout()));

    let mut records = Vec::new();
    for _ in 0..40 {
        records = app.0.recent_prices(10).await.unwrap();
        if !records.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].price, 5.4321);
}

#[tokio::test]
async fn test_health_check() {
    let server = test_server(UnavailableApp::default(), AxumConfig::default());

    let response = server.get("/health").await;

    response.assert_status_ok();
    response.assert_json(&serde_json::json!({ "status": "ok" }));
}
