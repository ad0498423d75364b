use tracing::{error, info};

use crate::api::analytics::AnalyticsClient;
use crate::config::AppConfig;
use crate::models::SeriesSummary;
use crate::services::chart_service::{save_chart, ChartRenderer, PlottersRenderer};
use crate::services::display_service::show_chart;
use crate::services::series_service::build_series;
use crate::utils::ChartError;

/// Fetch, parse, render and save the clicks-over-time chart
///
/// Single attempt; every failure aborts before the output file is touched.
pub async fn run(
    config: &AppConfig,
    renderer: &dyn ChartRenderer,
) -> Result<SeriesSummary, ChartError> {
    let client = AnalyticsClient::new(config)?;

    let buckets = client.get_clicks_over_time().await?;
    info!("Received {} click buckets", buckets.len());

    let series = build_series(&buckets)?;
    let summary = series.summary().ok_or(ChartError::EmptyData)?;

    save_chart(renderer, &series, &config.output_path)?;
    info!("{}", summary);

    if config.show_chart {
        show_chart(&config.output_path);
    }

    Ok(summary)
}

/// Human-readable line for the terminal
fn user_message(err: &ChartError) -> String {
    match err {
        ChartError::Connectivity(_) => format!("{} (is the backend running?)", err),
        _ => err.to_string(),
    }
}

/// Generate the chart with the plotters renderer. Returns `true` on success.
pub async fn generate_chart(config: &AppConfig) -> bool {
    generate_chart_with(config, &PlottersRenderer::default()).await
}

/// Generate the chart and report the outcome to the user
pub async fn generate_chart_with(config: &AppConfig, renderer: &dyn ChartRenderer) -> bool {
    match run(config, renderer).await {
        Ok(summary) => {
            println!("✅ Chart saved to {}", config.output_path.display());
            println!("   {}", summary);
            true
        }
        Err(e) => {
            error!("Chart generation failed: {}", e);
            eprintln!("❌ {}", user_message(&e));
            false
        }
    }
}
