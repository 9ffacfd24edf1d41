/// Per-request context passed explicitly through the pipeline.
///
/// Carries the request identifier so every layer (handler, service, source)
/// can tag its log lines without relying on ambient global state.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }
}
