use std::time::Duration;

use weather_core::{FavoritesError, FavoritesStore, FetchError, OpenWeatherProvider, WeatherProvider};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LONDON_JSON: &str = r#"{"name":"London","sys":{"country":"GB"},"main":{"temp":15.2,"feels_like":14.8,"humidity":72},"weather":[{"description":"light rain"}],"wind":{"speed":4.1}}"#;

fn provider_for(server: &MockServer, timeout: Duration) -> OpenWeatherProvider {
    OpenWeatherProvider::new("TEST_KEY".into(), format!("{}/data/2.5/weather", server.uri()), timeout)
        .expect("client builds")
}

async fn server_answering(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;

    server
}

#[tokio::test]
async fn london_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "London"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string(LONDON_JSON),
        )
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server, Duration::from_secs(10));
    let record = provider.fetch_weather("London").await.expect("200 response");

    assert_eq!(record.city, "London");
    assert_eq!(record.country, "GB");
    assert_eq!(record.temperature, Some(15.2));
    assert_eq!(record.feels_like, Some(14.8));
    assert_eq!(record.humidity, Some(72.0));
    assert_eq!(record.description, "light rain");
    assert_eq!(record.wind_speed, Some(4.1));

    let mut favorites = FavoritesStore::new();
    let ok = favorites.insert_new(&record).expect("empty store has room");
    assert!(ok.to_string().contains("London"));

    let err = favorites.insert_new(&record).unwrap_err();
    assert_eq!(err, FavoritesError::AlreadyExists("London".into()));
}

#[tokio::test]
async fn partial_payload_degrades_to_defaults() {
    let server = server_answering(200, r#"{"name":"Reykjavik"}"#).await;
    let provider = provider_for(&server, Duration::from_secs(10));

    let record = provider.fetch_weather("Reykjavik").await.expect("200 response");

    assert_eq!(record.city, "Reykjavik");
    assert_eq!(record.country, "Unknown");
    assert_eq!(record.description, "Unknown");
    assert_eq!(record.temperature, None);
    assert_eq!(record.wind_speed, None);
}

#[tokio::test]
async fn not_found_is_classified() {
    let server = server_answering(404, r#"{"cod":"404","message":"city not found"}"#).await;
    let provider = provider_for(&server, Duration::from_secs(10));

    let err = provider.fetch_weather("Atlantis").await.unwrap_err();
    assert_eq!(err, FetchError::CityNotFound { city: "Atlantis".into() });
}

#[tokio::test]
async fn unauthorized_is_invalid_credential() {
    let server = server_answering(401, r#"{"cod":401}"#).await;
    let provider = provider_for(&server, Duration::from_secs(10));

    let err = provider.fetch_weather("London").await.unwrap_err();
    assert_eq!(err, FetchError::InvalidCredential);
}

#[tokio::test]
async fn too_many_requests_is_rate_limited() {
    let server = server_answering(429, "").await;
    let provider = provider_for(&server, Duration::from_secs(10));

    let err = provider.fetch_weather("London").await.unwrap_err();
    assert_eq!(err, FetchError::RateLimited);
}

#[tokio::test]
async fn other_status_is_unexpected() {
    let server = server_answering(503, "maintenance").await;
    let provider = provider_for(&server, Duration::from_secs(10));

    let err = provider.fetch_weather("London").await.unwrap_err();
    assert_eq!(err, FetchError::UnexpectedStatus(503));
}

#[tokio::test]
async fn garbage_body_is_transport_error() {
    let server = server_answering(200, "not json").await;
    let provider = provider_for(&server, Duration::from_secs(10));

    let err = provider.fetch_weather("London").await.unwrap_err();
    assert!(matches!(err, FetchError::TransportError(_)));
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(LONDON_JSON)
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let provider = provider_for(&server, Duration::from_millis(200));

    let err = provider.fetch_weather("London").await.unwrap_err();
    assert_eq!(err, FetchError::TimedOut);
}

#[tokio::test]
async fn unreachable_host_is_connection_failure() {
    // Bind then drop a listener so the port is known to be closed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        listener.local_addr().expect("local addr").port()
    };

    let provider = OpenWeatherProvider::new(
        "TEST_KEY".into(),
        format!("http://127.0.0.1:{port}/data/2.5/weather"),
        Duration::from_secs(5),
    )
    .expect("client builds");

    let err = provider.fetch_weather("London").await.unwrap_err();
    assert_eq!(err, FetchError::ConnectionFailed);
}

#[tokio::test]
async fn malformed_base_url_is_transport_error() {
    let provider = OpenWeatherProvider::new("TEST_KEY".into(), "not a url".into(), Duration::from_secs(5))
        .expect("client builds");

    let err = provider.fetch_weather("London").await.unwrap_err();
    assert!(matches!(err, FetchError::TransportError(_)), "{err:?}");
}

#[tokio::test]
async fn odd_city_names_are_sent_encoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("q", "São Paulo & Co?"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server, Duration::from_secs(10));

    let err = provider.fetch_weather("São Paulo & Co?").await.unwrap_err();
    assert!(matches!(err, FetchError::CityNotFound { .. }));
}
