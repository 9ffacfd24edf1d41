use std::time::Duration;

use axum::{
    extract::{Extension, Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use tracing::{Instrument, debug, info_span};
use uuid::Uuid;

use weather_core::RequestContext;

use crate::handler::encode_error;

/// Attach a request identifier to the request and its log lines.
///
/// The id comes from an inbound `Request-ID` header when present,
/// otherwise a fresh UUID. Downstream layers read it from the
/// [`RequestContext`] extension rather than from any global.
pub async fn log_context(mut req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get("Request-ID")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let span = info_span!("request", request_id = %request_id);
    debug!(
        parent: &span,
        method = %req.method(),
        uri = %req.uri(),
        "incoming request"
    );

    req.extensions_mut().insert(RequestContext::new(request_id));
    next.run(req).instrument(span).await
}

/// Example auth middleware backed by an external service.
#[derive(Debug, Clone)]
pub struct Auth {
    pub base_url: String,
}

impl Auth {
    // TODO: pull a bearer token from the header and verify it against
    // `base_url`; everyone is authorized until then.
    fn check(
        &self,
        _req: &Request,
    ) -> impl std::future::Future<Output = Result<(), &'static str>> + Send + use<> {
        async { Ok(()) }
    }
}

pub async fn authorize(
    State(auth): State<Auth>,
    Extension(ctx): Extension<RequestContext>,
    req: Request,
    next: Next,
) -> Response {
    if let Err(reason) = auth.check(&req).await {
        return encode_error(&ctx, StatusCode::UNAUTHORIZED, vec![reason.to_string()], "");
    }
    next.run(req).await
}

/// Deadline for the whole request pipeline, configured once at startup.
#[derive(Debug, Clone, Copy)]
pub struct RequestDeadline(pub Duration);

pub async fn deadline(
    State(RequestDeadline(limit)): State<RequestDeadline>,
    Extension(ctx): Extension<RequestContext>,
    req: Request,
    next: Next,
) -> Response {
    match tokio::time::timeout(limit, next.run(req)).await {
        Ok(resp) => resp,
        Err(_) => encode_error(
            &ctx,
            StatusCode::INTERNAL_SERVER_ERROR,
            vec![format!(
                "request exceeded the {}s service deadline",
                limit.as_secs()
            )],
            "",
        ),
    }
}
