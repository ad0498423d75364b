use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::{debug, info};

use crate::models::Series;
use crate::utils::ChartError;

pub const CHART_TITLE: &str = "Clicks vs Time";
pub const X_AXIS_LABEL: &str = "Date";
pub const Y_AXIS_LABEL: &str = "Total Clicks";

/// 10x5 chart units at 100 px per unit
pub const DEFAULT_WIDTH: u32 = 1000;
pub const DEFAULT_HEIGHT: u32 = 500;

/// Draws a series into an image file at `path`
pub trait ChartRenderer {
    fn render(&self, series: &Series, path: &Path) -> Result<(), ChartError>;
}

/// Line chart rendered with plotters' bitmap backend
#[derive(Debug, Clone, Copy)]
pub struct PlottersRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for PlottersRenderer {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Y-axis range with 10% padding (at least 1) around the data
pub fn calculate_y_range(values: &[u64]) -> (u64, u64) {
    if values.is_empty() {
        return (0, 10);
    }

    let min_val = values.iter().copied().min().unwrap_or(0);
    let max_val = values.iter().copied().max().unwrap_or(10);

    let padding = ((max_val - min_val) as f64 * 0.1).max(1.0) as u64;

    (min_val.saturating_sub(padding), max_val.saturating_add(padding))
}

impl ChartRenderer for PlottersRenderer {
    fn render(&self, series: &Series, path: &Path) -> Result<(), ChartError> {
        if series.is_empty() {
            return Err(ChartError::EmptyData);
        }

        let dates = series.dates();
        let counts = series.counts();
        let (y_min, y_max) = calculate_y_range(&counts);

        // Points sit at indices 0..n, one slot of padding either side
        let x_range = -1i64..counts.len() as i64;

        let root = BitMapBackend::new(path, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| ChartError::Unclassified(format!("Failed to fill canvas: {}", e)))?;

        let mut chart = ChartBuilder::on(&root)
            .caption(CHART_TITLE, ("sans-serif", 28.0).into_font())
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, y_min..y_max)
            .map_err(|e| ChartError::Unclassified(format!("Failed to build chart: {}", e)))?;

        chart
            .configure_mesh()
            .x_desc(X_AXIS_LABEL)
            .y_desc(Y_AXIS_LABEL)
            .x_labels(dates.len().min(10))
            .y_labels(10)
            .x_label_formatter(&|x| {
                usize::try_from(*x)
                    .ok()
                    .and_then(|i| dates.get(i))
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default()
            })
            .draw()
            .map_err(|e| ChartError::Unclassified(format!("Failed to draw mesh: {}", e)))?;

        chart
            .draw_series(LineSeries::new(
                counts.iter().enumerate().map(|(i, &c)| (i as i64, c)),
                ShapeStyle::from(&BLUE).stroke_width(2),
            ))
            .map_err(|e| ChartError::Unclassified(format!("Failed to draw line: {}", e)))?;

        chart
            .draw_series(
                counts
                    .iter()
                    .enumerate()
                    .map(|(i, &c)| Circle::new((i as i64, c), 4, BLUE.filled())),
            )
            .map_err(|e| ChartError::Unclassified(format!("Failed to draw points: {}", e)))?;

        root.present()
            .map_err(|e| ChartError::Unclassified(format!("Failed to render chart: {}", e)))?;

        debug!("Rendered {} points to {}", series.len(), path.display());
        Ok(())
    }
}

/// Sibling path the chart is rendered to before being moved into place.
/// Keeps the target's extension since the bitmap encoder picks its format from it.
fn temp_path_for(output_path: &Path) -> PathBuf {
    let stem = output_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "chart".to_string());
    let ext = output_path
        .extension()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "png".to_string());
    let file_name = format!(
        ".{}.{}.{}",
        stem,
        chrono::Utc::now().timestamp_millis(),
        ext
    );

    match output_path.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Render the series and move the image over `output_path`
///
/// The target is only replaced once rendering has fully succeeded.
pub fn save_chart(
    renderer: &dyn ChartRenderer,
    series: &Series,
    output_path: &Path,
) -> Result<(), ChartError> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let temp_path = temp_path_for(output_path);

    if let Err(e) = renderer.render(series, &temp_path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e);
    }

    if let Err(e) = std::fs::rename(&temp_path, output_path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(ChartError::Unclassified(format!(
            "Failed to save chart to {}: {}",
            output_path.display(),
            e
        )));
    }

    info!("Chart saved to {}", output_path.display());
    Ok(())
}
