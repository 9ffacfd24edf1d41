use serde::{Serialize, Serializer};

/// Output float precision for echoed coordinates: always six decimal
/// places, rendered as text (`1.2` becomes `"1.200000"`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreciseF32(pub f32);

impl Serialize for PreciseF32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{:.6}", self.0))
    }
}

/// Success envelope for `GET /`.
#[derive(Debug, Serialize)]
pub struct CurrentByCoordsResponse {
    pub id: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub attributes: CurrentAttributes,
    // links / relationships / meta may be added here later
}

#[derive(Debug, Serialize)]
pub struct CurrentAttributes {
    pub latitude: PreciseF32,
    pub longitude: PreciseF32,
    pub temperature: String,
    pub condition: String,
}

/// One accumulated error, in detection order.
#[derive(Debug, Serialize)]
pub struct ErrorItem {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Failure envelope: the status code plus every error that was detected.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub errors: Vec<ErrorItem>,
}
