pub mod chart_service;
pub mod display_service;
pub mod generator_service;
pub mod series_service;

pub use generator_service::generate_chart;
