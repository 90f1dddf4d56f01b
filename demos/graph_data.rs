//! demos/graph_data.rs
//!
//! Fetches a week of sensor data, assembles a time series per requested
//! `(category, column)` pair, and plots the first sensor of each with
//! `plotlars`.
//!
//! To run: cargo run --example graph_data --features examples

use chrono::DateTime;
use plotlars::{Plot, Text, TimeSeriesPlot};
use polars::prelude::*;
use sensorfetch::{SensorFetch, Series};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let client = SensorFetch::new().await?;

    let sensors = ["sds011_43258", "dht22_43259"];
    let groups = client.fetch_last_days(&sensors, 7).await?;

    // A category with nothing fetched only skips its own chart.
    for (category, column) in [("sds011", "P1"), ("dht22", "temperature")] {
        match client.series_for(&groups, category, column) {
            Ok(series) => plot_series(category, column, &series)?,
            Err(e) => eprintln!("Skipping {category}-{column}: {e}"),
        }
    }
    Ok(())
}

fn plot_series(category: &str, column: &str, series: &[Series]) -> Result<(), Box<dyn Error>> {
    let Some(series) = series.first() else {
        return Ok(());
    };
    let time: Vec<String> = series
        .points
        .iter()
        .filter_map(|p| DateTime::from_timestamp_millis(p.timestamp_ms))
        .map(|dt| dt.naive_utc().to_string())
        .collect();
    let values: Vec<f64> = series.points.iter().map(|p| p.value).collect();
    let data = df!("time" => time, column => values)?;
    let title = format!("{category} {column} ({})", series.name);

    TimeSeriesPlot::builder()
        .data(&data)
        .x("time")
        .y(column)
        .plot_title(Text::from(title.as_str()))
        .build()
        .plot();
    Ok(())
}
