//! Renders the assembled chart dataset to a PNG image

use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;

use crate::models::chart::{ChartData, ChartType, DataSeries};

/// Fallback color when a series carries an unparsable color string
const FALLBACK_COLOR: RGBAColor = RGBAColor(66, 66, 66, 0.4);

/// Parse an `rgba(r, g, b, a)` color string
fn parse_rgba(value: &str) -> Option<(u8, u8, u8, f64)> {
    let inner = value.trim().strip_prefix("rgba(")?.strip_suffix(')')?;
    let mut parts = inner.split(',').map(str::trim);
    let r = parts.next()?.parse().ok()?;
    let g = parts.next()?.parse().ok()?;
    let b = parts.next()?.parse().ok()?;
    let a = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((r, g, b, a))
}

fn series_color(series: &DataSeries) -> RGBAColor {
    parse_rgba(&series.color)
        .map(|(r, g, b, a)| RGBAColor(r, g, b, a))
        .unwrap_or(FALLBACK_COLOR)
}

/// Render chart data as PNG bytes in the requested chart mode
pub fn generate_chart(
    data: &ChartData,
    chart_type: ChartType,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, String> {
    if data.datasets.is_empty() || data.labels.is_empty() {
        return Err("No chart data to render.".to_string());
    }

    // Use a temporary file path for BitMapBackend
    let temp_file = format!(
        "/tmp/coinchart_{}.png",
        chrono::Utc::now().timestamp_millis()
    );

    {
        let backend = BitMapBackend::new(&temp_file, (width, height));
        let root = backend.into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| format!("Failed to fill canvas: {}", e))?;

        match chart_type {
            ChartType::Line | ChartType::Bar => draw_cartesian(&root, data, chart_type)?,
            ChartType::Pie | ChartType::Doughnut => draw_pie(&root, data, chart_type)?,
        }

        root.present()
            .map_err(|e| format!("Failed to render chart: {}", e))?;
    }

    // Read the temporary file into memory
    use std::fs;
    let image_data = fs::read(&temp_file).map_err(|e| format!("Failed to read chart file: {}", e))?;

    // Clean up temporary file
    let _ = fs::remove_file(&temp_file);

    Ok(image_data)
}

fn draw_cartesian(
    root: &DrawingArea<BitMapBackend, Shift>,
    data: &ChartData,
    chart_type: ChartType,
) -> Result<(), String> {
    // Find value range across all series
    let min_value = data
        .datasets
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold(f64::INFINITY, f64::min);
    let max_value = data
        .datasets
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .fold(f64::NEG_INFINITY, f64::max);

    // Add some padding to the value range
    let value_range = (max_value - min_value).max(1e-8); // Avoid division by zero
    let padding = value_range * 0.1;
    let y_min = (min_value - padding).max(0.0);
    let y_max = max_value + padding;

    let x_max = data.labels.len() as i32;
    let legends: Vec<&str> = data.datasets.iter().map(|s| s.legend.as_str()).collect();

    let mut chart = ChartBuilder::on(root)
        .caption(
            format!("{} Price Chart", legends.join(", ")),
            ("sans-serif", 40.0).into_font(),
        )
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0..x_max, y_min..y_max)
        .map_err(|e| format!("Failed to build chart: {}", e))?;

    chart
        .configure_mesh()
        .x_desc("Time")
        .y_desc("Price")
        .x_labels(data.labels.len().min(10))
        .x_label_formatter(&|idx: &i32| {
            data.labels
                .get(*idx as usize)
                .cloned()
                .unwrap_or_default()
        })
        .draw()
        .map_err(|e| format!("Failed to draw mesh: {}", e))?;

    for series in &data.datasets {
        let color = series_color(series);
        match chart_type {
            ChartType::Bar => {
                let style = color.filled();
                chart
                    .draw_series(series.values.iter().enumerate().map(|(i, v)| {
                        Rectangle::new([(i as i32, y_min), (i as i32 + 1, *v)], style)
                    }))
                    .map_err(|e| format!("Failed to draw series: {}", e))?
                    .label(series.legend.as_str())
                    .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], style));
            }
            _ => {
                chart
                    .draw_series(LineSeries::new(
                        series
                            .values
                            .iter()
                            .enumerate()
                            .map(|(i, v)| (i as i32, *v)),
                        color,
                    ))
                    .map_err(|e| format!("Failed to draw series: {}", e))?
                    .label(series.legend.as_str())
                    .legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], color)
                    });
            }
        }
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| format!("Failed to draw legend: {}", e))?;

    Ok(())
}

fn draw_pie(
    root: &DrawingArea<BitMapBackend, Shift>,
    data: &ChartData,
    chart_type: ChartType,
) -> Result<(), String> {
    // One slice per series, sized by its latest value
    let sizes: Vec<f64> = data
        .datasets
        .iter()
        .map(|s| s.values.last().copied().unwrap_or(0.0))
        .collect();
    let colors: Vec<RGBColor> = data
        .datasets
        .iter()
        .map(series_color)
        .map(|c| RGBColor(c.0, c.1, c.2))
        .collect();
    let labels: Vec<String> = data.datasets.iter().map(|s| s.legend.clone()).collect();

    let (width, height) = root.dim_in_pixel();
    let center = ((width / 2) as i32, (height / 2) as i32);
    let radius = f64::from(width.min(height)) * 0.35;

    let pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    root.draw(&pie)
        .map_err(|e| format!("Failed to draw pie: {}", e))?;

    if chart_type == ChartType::Doughnut {
        root.draw(&Circle::new(center, (radius * 0.5) as i32, WHITE.filled()))
            .map_err(|e| format!("Failed to draw doughnut hole: {}", e))?;
    }

    Ok(())
}
