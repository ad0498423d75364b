//! Click analytics models

use chrono::NaiveDate;

/// Clicks recorded for a single day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickRecord {
    pub date: NaiveDate,
    pub clicks: u64,
}

/// Click records in the order the API returned them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Series {
    records: Vec<ClickRecord>,
}

impl Series {
    pub fn new(records: Vec<ClickRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ClickRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.records.iter().map(|r| r.date).collect()
    }

    pub fn counts(&self) -> Vec<u64> {
        self.records.iter().map(|r| r.clicks).collect()
    }

    /// Index of the first record whose date is not after its predecessor's
    pub fn first_out_of_order(&self) -> Option<usize> {
        self.records
            .windows(2)
            .position(|w| w[1].date <= w[0].date)
            .map(|i| i + 1)
    }

    /// Totals for the report printed after a run; `None` for an empty series
    pub fn summary(&self) -> Option<SeriesSummary> {
        let first = self.records.first()?;
        let last = self.records.last()?;

        let mut peak = *first;
        for record in &self.records[1..] {
            if record.clicks > peak.clicks {
                peak = *record;
            }
        }

        Some(SeriesSummary {
            points: self.records.len(),
            total_clicks: self
                .records
                .iter()
                .fold(0u64, |acc, r| acc.saturating_add(r.clicks)),
            first_date: first.date,
            last_date: last.date,
            peak,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesSummary {
    pub points: usize,
    pub total_clicks: u64,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    /// Earliest-listed record holding the highest count
    pub peak: ClickRecord,
}

impl std::fmt::Display for SeriesSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} clicks over {} days ({} to {}), peak {} on {}",
            self.total_clicks, self.points, self.first_date, self.last_date, self.peak.clicks, self.peak.date
        )
    }
}
