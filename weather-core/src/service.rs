use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::{
    context::RequestContext,
    model::{TempBand, Weather},
    source::{SourceError, WeatherSource},
};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("getting current weather by coordinates: {0}")]
    Source(#[from] SourceError),
}

/// Business-logic boundary the HTTP layer talks to. Kept as a trait so
/// handlers can be exercised against fakes.
#[async_trait]
pub trait CurrentWeather: Send + Sync {
    /// Current weather conditions at a latitude and longitude.
    async fn current_in(
        &self,
        ctx: &RequestContext,
        latitude: f32,
        longitude: f32,
    ) -> Result<Weather, ServiceError>;
}

/// Domain service: fetches a raw reading and classifies it.
#[derive(Debug)]
pub struct WeatherService<S> {
    source: S,
}

impl<S: WeatherSource> WeatherService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }
}

#[async_trait]
impl<S: WeatherSource> CurrentWeather for WeatherService<S> {
    async fn current_in(
        &self,
        ctx: &RequestContext,
        latitude: f32,
        longitude: f32,
    ) -> Result<Weather, ServiceError> {
        let current = self.source.by_coords(ctx, latitude, longitude).await?;

        let states: Vec<String> = current.conditions.iter().map(|c| c.name.clone()).collect();
        let band = TempBand::from_current(current.temperature.temp);
        debug!(
            request_id = %ctx.request_id,
            band = %band,
            conditions = states.len(),
            "classified current weather"
        );

        Ok(Weather {
            coords: current.coords,
            states,
            temperature: band,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::model::{Condition, Coords, SourceWeather, TemperatureReading};

    fn rain() -> Condition {
        Condition {
            id: 1,
            name: "rain".into(),
            description: "wetness falls from the sky".into(),
        }
    }

    fn hail() -> Condition {
        Condition {
            id: 2,
            name: "hail".into(),
            description: "hard wetness falls from the sky".into(),
        }
    }

    /// Source fake keyed by "lat:lon" with fixed precision, mirroring how
    /// the service formats its upstream queries.
    #[derive(Debug, Default)]
    struct MockSource {
        responses: HashMap<String, SourceWeather>,
    }

    impl MockSource {
        fn with(mut self, lat: f32, lon: f32, weather: SourceWeather) -> Self {
            self.responses.insert(format!("{lat:.4}:{lon:.4}"), weather);
            self
        }
    }

    #[async_trait]
    impl WeatherSource for MockSource {
        async fn by_coords(
            &self,
            _ctx: &RequestContext,
            latitude: f32,
            longitude: f32,
        ) -> Result<SourceWeather, SourceError> {
            self.responses
                .get(&format!("{latitude:.4}:{longitude:.4}"))
                .cloned()
                .ok_or(SourceError::UpstreamStatus {
                    status: 404,
                    body: "response not found".into(),
                })
        }
    }

    fn ctx() -> RequestContext {
        RequestContext::new("test-request")
    }

    #[tokio::test]
    async fn happy_path() {
        let source = MockSource::default().with(
            10.1,
            32.1,
            SourceWeather {
                coords: Coords {
                    latitude: 10.1,
                    longitude: 32.1,
                },
                conditions: vec![rain(), hail()],
                temperature: TemperatureReading {
                    temp: 39.99,
                    ..Default::default()
                },
            },
        );
        let service = WeatherService::new(source);

        let got = service
            .current_in(&ctx(), 10.1, 32.1)
            .await
            .expect("service call should succeed");

        assert_eq!(
            got,
            Weather {
                coords: Coords {
                    latitude: 10.1,
                    longitude: 32.1,
                },
                states: vec!["rain".into(), "hail".into()],
                temperature: TempBand::Cold,
            }
        );
    }

    #[tokio::test]
    async fn duplicate_conditions_are_retained_in_order() {
        let source = MockSource::default().with(
            1.0,
            2.0,
            SourceWeather {
                coords: Coords {
                    latitude: 1.0,
                    longitude: 2.0,
                },
                conditions: vec![hail(), rain(), rain()],
                temperature: TemperatureReading {
                    temp: 85.0,
                    ..Default::default()
                },
            },
        );
        let service = WeatherService::new(source);

        let got = service.current_in(&ctx(), 1.0, 2.0).await.expect("ok");

        assert_eq!(got.states, vec!["hail", "rain", "rain"]);
        assert_eq!(got.temperature, TempBand::Hot);
    }

    #[tokio::test]
    async fn source_error_is_wrapped() {
        let service = WeatherService::new(MockSource::default());

        let err = service.current_in(&ctx(), 1.1, 2.2).await.unwrap_err();

        let msg = err.to_string();
        assert!(
            msg.contains("getting current weather by coordinates"),
            "got: {msg}"
        );
        assert!(msg.contains("response not found"), "got: {msg}");
    }
}
