use chrono::NaiveDate;
use tracing::warn;

use crate::api::analytics::ClickBucket;
use crate::models::{ClickRecord, Series};
use crate::utils::ChartError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` day exactly; padding or embedded whitespace is rejected
fn parse_day(raw: &str) -> Option<NaiveDate> {
    if raw.chars().any(char::is_whitespace) {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// Turn API buckets into a series, keeping response order
///
/// Any bucket with an unparsable date fails the whole batch.
pub fn build_series(buckets: &[ClickBucket]) -> Result<Series, ChartError> {
    if buckets.is_empty() {
        return Err(ChartError::EmptyData);
    }

    let records = buckets
        .iter()
        .enumerate()
        .map(|(index, bucket)| {
            parse_day(&bucket.id)
                .map(|date| ClickRecord {
                    date,
                    clicks: bucket.clicks,
                })
                .ok_or_else(|| ChartError::DateParse {
                    value: bucket.id.clone(),
                    index,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let series = Series::new(records);

    // Charted as received; the backend sorts by _id so this only fires on a contract change
    if let Some(index) = series.first_out_of_order() {
        warn!(
            "Click records are not in ascending date order (record {} is {}), plotting in received order",
            index,
            series.records()[index].date
        );
    }

    Ok(series)
}
