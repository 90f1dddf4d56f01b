use crate::fetch::error::FetchError;
use crate::fetch::fetcher::ArchiveFetcher;
use crate::types::date_range::DateRange;
use crate::types::outcome::{FetchOutcome, SensorReport};
use chrono::NaiveDate;
use futures_util::future::join_all;
use log::{info, warn};

/// Fetches every date in `[start, end]` for one sensor, one concurrent task
/// per date, and reduces the completions into a [`SensorReport`].
///
/// All tasks are awaited; a failed date never cancels its siblings, it just
/// shows up as a `Failure` entry. Completion order is whatever the runtime
/// produces; the report is sorted ascending by date afterwards. One progress
/// line per date goes to the log, carrying the attempted address on failure.
pub async fn fetch_sensor(
    fetcher: &ArchiveFetcher,
    sensor: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<SensorReport, FetchError> {
    info!("Fetching {sensor}");
    let tasks: Vec<_> = DateRange::descending(start, end)
        .map(|date| {
            let fetcher = fetcher.clone();
            let sensor = sensor.to_string();
            tokio::spawn(async move { fetcher.fetch(date, &sensor).await })
        })
        .collect();

    let mut outcomes = Vec::with_capacity(tasks.len());
    for joined in join_all(tasks).await {
        outcomes.push(joined?);
    }

    let report = SensorReport::new(sensor, outcomes);
    for outcome in report.outcomes() {
        match outcome {
            FetchOutcome::Success { date, .. } => info!("{date} - success"),
            FetchOutcome::Failure { date, url, .. } => {
                warn!("{date} - failure. Failed to fetch {url}")
            }
        }
    }
    Ok(report)
}
