pub mod client;
pub mod models;

#[cfg(test)]
pub(crate) mod test_server;

pub use client::AnalyticsClient;
pub use models::ClickBucket;
