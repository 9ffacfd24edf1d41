use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Extension, Query, State},
    http::{StatusCode, header},
    response::Response,
};
use thiserror::Error;
use tracing::error;

use weather_core::{CurrentWeather, RequestContext};

use crate::response::{CurrentAttributes, CurrentByCoordsResponse, ErrorItem, ErrorResponse, PreciseF32};

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub domain: Arc<dyn CurrentWeather>,
}

/// Client input errors; always answered with 400.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("missing query parameter: {0}")]
    Missing(&'static str),
    #[error("invalid float: {0}")]
    InvalidNumber(&'static str),
}

/// Validate the raw query map into a coordinate pair.
///
/// Both fields are checked even when the first already failed; errors
/// accumulate in detection order, latitude before longitude. Values are
/// parsed at single precision and not range-checked, so e.g. a latitude
/// of 95.0 passes through.
pub fn validate_coords(params: &HashMap<String, String>) -> Result<(f32, f32), Vec<ParamError>> {
    let mut errs = Vec::new();

    let latitude = parse_field(params, "latitude", &mut errs);
    let longitude = parse_field(params, "longitude", &mut errs);

    match (latitude, longitude) {
        (Some(lat), Some(lon)) if errs.is_empty() => Ok((lat, lon)),
        _ => Err(errs),
    }
}

fn parse_field(
    params: &HashMap<String, String>,
    field: &'static str,
    errs: &mut Vec<ParamError>,
) -> Option<f32> {
    match params.get(field) {
        None => {
            errs.push(ParamError::Missing(field));
            None
        }
        Some(raw) => match raw.parse::<f32>() {
            Ok(value) => Some(value),
            Err(_) => {
                errs.push(ParamError::InvalidNumber(field));
                None
            }
        },
    }
}

/// `GET /` — current weather for the `latitude`/`longitude` query params.
pub async fn get_current_by_coords(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let (lat, lon) = match validate_coords(&params) {
        Ok(pair) => pair,
        Err(errs) => {
            let messages = errs.iter().map(ToString::to_string).collect();
            return encode_error(
                &ctx,
                StatusCode::BAD_REQUEST,
                messages,
                "required query parameters",
            );
        }
    };

    let weather = match state.domain.current_in(&ctx, lat, lon).await {
        Ok(weather) => weather,
        Err(err) => {
            return encode_error(
                &ctx,
                StatusCode::INTERNAL_SERVER_ERROR,
                vec![format!("retrieving current weather: {err}")],
                "",
            );
        }
    };

    // Remap the domain object to the API shape. Coordinates are echoed
    // from the validated request, not from the provider.
    let resp = CurrentByCoordsResponse {
        id: "urn:weather:current:id",
        kind: "urn:weather:current",
        attributes: CurrentAttributes {
            latitude: PreciseF32(lat),
            longitude: PreciseF32(lon),
            temperature: weather.temperature.as_str().to_string(),
            condition: weather.states.join(", "),
        },
    };
    match serde_json::to_vec(&resp) {
        Ok(body) => json_response(StatusCode::OK, body),
        Err(err) => encode_error(
            &ctx,
            StatusCode::INTERNAL_SERVER_ERROR,
            vec![format!("encoding current weather response: {err}")],
            "",
        ),
    }
}

/// Build and log an error envelope. Every accumulated error is logged with
/// the response status; if the envelope itself fails to serialize, a
/// minimal hand-built JSON body goes out instead.
pub fn encode_error(
    ctx: &RequestContext,
    status: StatusCode,
    errors: Vec<String>,
    message: &str,
) -> Response {
    for err in &errors {
        error!(
            request_id = %ctx.request_id,
            status_code = status.as_u16(),
            error = %err,
            "request failed"
        );
    }

    let resp = ErrorResponse {
        status: status.as_u16(),
        errors: errors
            .into_iter()
            .map(|error| ErrorItem {
                error,
                message: (!message.is_empty()).then(|| message.to_string()),
            })
            .collect(),
    };
    let body = serde_json::to_vec(&resp).unwrap_or_else(|err| {
        error!(request_id = %ctx.request_id, %err, "encoding error response");
        format!(r#"{{"status":500,"errors":[{{"error":"error encoding error response: {err}"}}]}}"#)
            .into_bytes()
    });
    json_response(status, body)
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response {
    let mut resp = Response::new(Body::from(body));
    *resp.status_mut() = status;
    resp.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    resp
}
