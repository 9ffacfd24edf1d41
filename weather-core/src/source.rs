use std::fmt::Debug;

use async_trait::async_trait;
use thiserror::Error;

use crate::{context::RequestContext, model::SourceWeather};

pub mod openweather;

/// Failure modes of a single upstream fetch. No retries happen at this
/// layer; one failed attempt is terminal for the request.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Connection-level failure, including the per-call deadline expiring.
    #[error("executing current weather request: {0}")]
    Transport(#[source] reqwest::Error),

    /// The upstream answered with a non-2xx status. The body is captured
    /// best-effort for diagnostics.
    #[error("current weather by coordinates ({status}): {body}")]
    UpstreamStatus { status: u16, body: String },

    /// The upstream answered 2xx but the body was not the documented JSON.
    #[error("decoding current weather response body: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Where actual weather data comes from.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// Retrieve current weather data for a set of coordinates.
    async fn by_coords(
        &self,
        ctx: &RequestContext,
        latitude: f32,
        longitude: f32,
    ) -> Result<SourceWeather, SourceError>;
}
