//! Data models shared between the fetch, parse and render steps

pub mod clicks;

pub use clicks::{ClickRecord, Series, SeriesSummary};
