use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    context::RequestContext,
    model::{Condition, Coords, SourceWeather, TemperatureReading},
    source::{SourceError, WeatherSource},
};

/// Adapter for the OpenWeather current-weather endpoint.
///
/// Each call is bounded by `timeout`, measured from send; exceeding it
/// surfaces as [`SourceError::Transport`].
#[derive(Debug, Clone)]
pub struct OpenWeatherSource {
    base_url: String,
    api_id: String,
    timeout: Duration,
    http: Client,
}

impl OpenWeatherSource {
    pub fn new(base_url: String, api_id: String, timeout: Duration) -> Self {
        Self {
            base_url,
            api_id,
            timeout,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherSource {
    async fn by_coords(
        &self,
        ctx: &RequestContext,
        latitude: f32,
        longitude: f32,
    ) -> Result<SourceWeather, SourceError> {
        let url = format!("{}/weather", self.base_url);
        debug!(
            request_id = %ctx.request_id,
            latitude,
            longitude,
            "requesting current weather"
        );

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", format!("{latitude:.6}")),
                ("lon", format!("{longitude:.6}")),
                ("appid", self.api_id.clone()),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(SourceError::Transport)?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(SourceError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = res.text().await.map_err(SourceError::Transport)?;
        let current: CurrentWeatherBody =
            serde_json::from_str(&body).map_err(SourceError::Decode)?;

        Ok(current.into())
    }
}

// Wire schema of the current-weather endpoint. Only the parts the service
// consumes are decoded; `sea_level`/`grnd_level` are absent for some
// stations and default to zero.
#[derive(Debug, Deserialize)]
struct CurrentWeatherBody {
    coord: WireCoord,
    weather: Vec<WireCondition>,
    main: WireMain,
}

#[derive(Debug, Deserialize)]
struct WireCoord {
    lat: f32,
    lon: f32,
}

#[derive(Debug, Deserialize)]
struct WireCondition {
    id: i64,
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct WireMain {
    temp: f32,
    feels_like: f32,
    temp_min: f32,
    temp_max: f32,
    pressure: i64,
    humidity: i64,
    #[serde(default)]
    sea_level: i64,
    #[serde(default)]
    grnd_level: i64,
}

impl From<CurrentWeatherBody> for SourceWeather {
    fn from(body: CurrentWeatherBody) -> Self {
        // Coordinates are the ones the provider reported back, not the
        // requested ones; the provider may snap to its grid.
        SourceWeather {
            coords: Coords {
                latitude: body.coord.lat,
                longitude: body.coord.lon,
            },
            conditions: body
                .weather
                .into_iter()
                .map(|w| Condition {
                    id: w.id,
                    name: w.main,
                    description: w.description,
                })
                .collect(),
            temperature: TemperatureReading {
                temp: body.main.temp,
                feels_like: body.main.feels_like,
                min: body.main.temp_min,
                max: body.main.temp_max,
                pressure: body.main.pressure,
                humidity: body.main.humidity,
                sea_level: body.main.sea_level,
                ground_level: body.main.grnd_level,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CURRENT_BODY: &str = r#"{
        "coord": {"lat": 10.0, "lon": 32.0},
        "weather": [
            {"id": 500, "main": "rain", "description": "wetness falls from the sky", "icon": "10d"},
            {"id": 511, "main": "hail", "description": "hard wetness falls from the sky", "icon": "13d"}
        ],
        "base": "stations",
        "main": {
            "temp": 39.99,
            "feels_like": 35.2,
            "temp_min": 30.0,
            "temp_max": 45.0,
            "pressure": 1013,
            "humidity": 81
        },
        "dt": 1661870592,
        "name": "Somewhere"
    }"#;

    fn ctx() -> RequestContext {
        RequestContext::new("test-request")
    }

    #[tokio::test]
    async fn normalizes_current_weather() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("lat", "10.500000"))
            .and(query_param("lon", "32.250000"))
            .and(query_param("appid", "KEY"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(CURRENT_BODY, "application/json"))
            .mount(&server)
            .await;

        let source = OpenWeatherSource::new(server.uri(), "KEY".into(), Duration::from_secs(5));
        let weather = source
            .by_coords(&ctx(), 10.5, 32.25)
            .await
            .expect("fetch should succeed");

        // Reported coordinates win over requested ones.
        assert_eq!(weather.coords.latitude, 10.0);
        assert_eq!(weather.coords.longitude, 32.0);

        let names: Vec<&str> = weather.conditions.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["rain", "hail"]);
        assert_eq!(weather.conditions[0].id, 500);
        assert_eq!(
            weather.conditions[1].description,
            "hard wetness falls from the sky"
        );

        assert_eq!(weather.temperature.temp, 39.99);
        assert_eq!(weather.temperature.pressure, 1013);
        assert_eq!(weather.temperature.humidity, 81);
        // Absent in the payload, decoded as zero.
        assert_eq!(weather.temperature.sea_level, 0);
        assert_eq!(weather.temperature.ground_level, 0);
    }

    #[tokio::test]
    async fn non_success_status_captures_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such place"))
            .mount(&server)
            .await;

        let source = OpenWeatherSource::new(server.uri(), "KEY".into(), Duration::from_secs(5));
        let err = source.by_coords(&ctx(), 1.0, 2.0).await.unwrap_err();

        match err {
            SourceError::UpstreamStatus { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "no such place");
            }
            other => panic!("expected UpstreamStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "application/json"))
            .mount(&server)
            .await;

        let source = OpenWeatherSource::new(server.uri(), "KEY".into(), Duration::from_secs(5));
        let err = source.by_coords(&ctx(), 1.0, 2.0).await.unwrap_err();

        assert!(matches!(err, SourceError::Decode(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn deadline_expiry_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(CURRENT_BODY, "application/json")
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let source = OpenWeatherSource::new(server.uri(), "KEY".into(), Duration::from_millis(50));
        let err = source.by_coords(&ctx(), 1.0, 2.0).await.unwrap_err();

        match err {
            SourceError::Transport(cause) => assert!(cause.is_timeout(), "got {cause:?}"),
            other => panic!("expected Transport, got {other:?}"),
        }
    }
}
