//! HTTP behavior of the NWS client and the full pipeline against a mock server.

use std::{
    io::{Read, Write},
    net::TcpListener,
    thread,
    time::Duration,
};

use weather_core::{
    ClientConfig, FetchError, NwsClient, Outcome, Pipeline, PipelineOptions, ReportKind, Stage,
    StationConfig, StationRegistry, WeatherClient,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

const USER_AGENT: &str = "weather-cli/test@example.com";

fn sample_forecast() -> serde_json::Value {
    serde_json::json!({
        "type": "Feature",
        "properties": {
            "units": "us",
            "periods": [
                {
                    "number": 1,
                    "name": "Tonight",
                    "startTime": "2024-06-01T18:00:00-05:00",
                    "isDaytime": false,
                    "temperature": 61,
                    "temperatureUnit": "F",
                    "probabilityOfPrecipitation": { "unitCode": "wmoUnit:percent", "value": null },
                    "windSpeed": "5 mph",
                    "windDirection": "S",
                    "shortForecast": "Mostly Clear"
                },
                {
                    "number": 2,
                    "name": "Sunday",
                    "startTime": "2024-06-02T06:00:00-05:00",
                    "isDaytime": true,
                    "temperature": 84,
                    "temperatureUnit": "F",
                    "probabilityOfPrecipitation": { "unitCode": "wmoUnit:percent", "value": 40 },
                    "windSpeed": "5 to 10 mph",
                    "windDirection": "SW",
                    "shortForecast": "Chance Showers And Thunderstorms"
                }
            ]
        }
    })
}

/// Create a test client with the given timeout
///
/// # Panics
///
/// Panics if the client cannot be created (should not happen in tests).
fn create_test_client(timeout_secs: u64) -> NwsClient {
    #[allow(clippy::expect_used)]
    NwsClient::new(ClientConfig::new(USER_AGENT).with_timeout(timeout_secs))
        .expect("Failed to create client")
}

fn registry() -> StationRegistry {
    StationRegistry::load(&[StationConfig {
        name: "Springfield".into(),
        locale: "Springfield, IL".into(),
        default: true,
        noaa_office: Some("ABC".into()),
        noaa_grid_x: Some(10),
        noaa_grid_y: Some(20),
        station_id: Some("KSPI".into()),
    }])
    .unwrap()
}

// ============================================================================
// Client
// ============================================================================

#[tokio::test]
async fn test_fetch_returns_body_and_sends_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/stations/KSPI/observations/latest"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"properties":{}}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(5);
    let url = format!("{}/stations/KSPI/observations/latest", mock_server.uri());
    let body = client.fetch(&url).await;

    assert_eq!(body.unwrap(), r#"{"properties":{}}"#);
}

#[tokio::test]
async fn test_non_success_status_is_http_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(5);
    let result = client.fetch(&format!("{}/anything", mock_server.uri())).await;

    assert_eq!(result, Err(FetchError::HttpStatus(503)));
}

#[tokio::test]
async fn test_slow_response_is_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;

    let client = create_test_client(1);
    let result = client.fetch(&format!("{}/slow", mock_server.uri())).await;

    assert_eq!(result, Err(FetchError::Timeout));
}

#[tokio::test]
async fn test_refused_connection_is_connection_failed() {
    let client = create_test_client(5);
    let result = client.fetch("http://127.0.0.1:1/stations/KSPI/observations/latest").await;

    assert!(
        matches!(result, Err(FetchError::ConnectionFailed(_))),
        "Expected ConnectionFailed, got: {result:?}"
    );
}

/// Accepts one connection, sends `head` and then stalls before any body bytes.
fn stalling_server(head: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut request = [0u8; 1024];
            let _ = stream.read(&mut request);
            let _ = stream.write_all(head.as_bytes());
            let _ = stream.flush();
            thread::sleep(Duration::from_secs(3));
        }
    });
    format!("http://{addr}/stations/KSPI/observations/latest")
}

#[tokio::test]
async fn test_stalled_success_body_is_timeout() {
    let url = stalling_server("HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n");
    let client = create_test_client(1);

    let result = client.fetch(&url).await;

    assert!(matches!(result, Err(FetchError::Timeout)), "Expected Timeout, got: {result:?}");
}

#[tokio::test]
async fn test_error_status_does_not_wait_for_body() {
    let url = stalling_server("HTTP/1.1 503 Service Unavailable\r\nContent-Length: 100\r\n\r\n");
    let client = create_test_client(1);

    let result = client.fetch(&url).await;

    assert_eq!(result, Err(FetchError::HttpStatus(503)));
}

// ============================================================================
// Pipeline
// ============================================================================

#[tokio::test]
async fn test_pipeline_renders_forecast_from_gridpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gridpoints/ABC/10,20/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let registry = registry();
    let client = create_test_client(5);
    let options = PipelineOptions { base_url: mock_server.uri(), include_precipitation: true };
    let pipeline = Pipeline::new(&registry, &client, options);

    let outcome = pipeline.run(registry.default_name(), ReportKind::Forecast).await;

    let Outcome::Rendered(table) = outcome else {
        panic!("Expected a rendered table");
    };
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines[0].trim(), "Weather Forecast for Springfield, IL");
    assert_eq!(lines.len(), 5);
    assert!(lines[3].contains("61F") && lines[3].ends_with("0%"));
    assert!(lines[4].contains("5 to 10 mph SW") && lines[4].ends_with("40%"));
}

#[tokio::test]
async fn test_pipeline_reports_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let registry = registry();
    let client = create_test_client(5);
    let options = PipelineOptions { base_url: mock_server.uri(), include_precipitation: true };
    let pipeline = Pipeline::new(&registry, &client, options);

    let outcome = pipeline.run("Springfield", ReportKind::Current).await;

    assert_eq!(
        outcome,
        Outcome::Failed { stage: Stage::Fetch, message: "Error: HTTP error: status 503".into() }
    );
}
