use serde::Deserialize;

/// One bucket from GET /api/admin/clicks-over-time
///
/// The backend groups URLs by creation day with a `$dateToString` aggregation,
/// so `_id` is the day as `YYYY-MM-DD` and `clicks` is the summed count.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClickBucket {
    #[serde(rename = "_id")]
    pub id: String,
    pub clicks: u64,
}

/// Error body the backend sends alongside 4xx/5xx codes
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
}
