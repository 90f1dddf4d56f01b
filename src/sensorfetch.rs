//! Main entry point: the [`SensorFetch`] client ties the per-sensor
//! scheduler, the category grouping, and the series assembly together.

use crate::config::FetchConfig;
use crate::error::SensorFetchError;
use crate::fetch::fetcher::ArchiveFetcher;
use crate::fetch::scheduler::fetch_sensor;
use crate::series::assembler::assemble_group;
use crate::types::outcome::ArtifactGroups;
use crate::types::sensor::category;
use crate::types::series::Series;
use crate::utils::{ensure_output_dir_exists, get_data_dir};
use bon::bon;
use chrono::{Duration, Local, NaiveDate};
use log::info;
use std::path::PathBuf;

/// Client for the sensor.community daily archive.
///
/// Downloads one CSV per `(date, sensor)` pair into an output directory,
/// reusing files that are already there, and groups what it fetched by
/// sensor category for charting.
///
/// # Examples
///
/// ```no_run
/// # use sensorfetch::{SensorFetch, SensorFetchError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), SensorFetchError> {
/// let client = SensorFetch::new().await?;
/// let sensors = ["sds011_43258".to_string(), "dht22_43259".to_string()];
/// let groups = client.fetch_last_days(&sensors, 7).await?;
/// let series = client.series_for(&groups, "sds011", "P1")?;
/// println!("{} series for sds011/P1", series.len());
/// # Ok(())
/// # }
/// ```
pub struct SensorFetch {
    fetcher: ArchiveFetcher,
}

#[bon]
impl SensorFetch {
    /// Creates a client with explicit options.
    ///
    /// * `output_dir` - where artifacts are stored; defaults to a
    ///   `sensorfetch` directory under the platform data dir. Created if
    ///   missing.
    /// * `archive_base` - archive root URL; defaults to the public
    ///   sensor.community archive.
    #[builder]
    pub async fn with_options(
        output_dir: Option<PathBuf>,
        archive_base: Option<String>,
    ) -> Result<Self, SensorFetchError> {
        let output_dir = match output_dir {
            Some(dir) => dir,
            None => get_data_dir().map_err(SensorFetchError::OutputDirResolution)?,
        };
        ensure_output_dir_exists(&output_dir)
            .await
            .map_err(|e| SensorFetchError::OutputDirCreation(output_dir.clone(), e))?;
        let fetcher = match archive_base {
            Some(base) => ArchiveFetcher::with_archive_base(&output_dir, base),
            None => ArchiveFetcher::new(&output_dir),
        };
        Ok(Self { fetcher })
    }

    /// Creates a client with the default output directory and archive.
    pub async fn new() -> Result<Self, SensorFetchError> {
        Self::with_options().call().await
    }

    /// Creates a client storing artifacts in the given directory.
    pub async fn with_output_dir(output_dir: PathBuf) -> Result<Self, SensorFetchError> {
        Self::with_options().output_dir(output_dir).call().await
    }

    /// Fetches every date in `[start, end]` for every sensor and groups the
    /// successful artifacts by sensor category.
    ///
    /// Sensors are processed one at a time, in lexicographic order of their
    /// identifiers regardless of input order, so the per-sensor lists inside
    /// each category group come out the same across runs. Within a sensor
    /// the dates are fetched concurrently; failed dates are logged and
    /// skipped, never fatal. The result is only returned once the whole
    /// batch is done.
    pub async fn fetch_batch<S: AsRef<str>>(
        &self,
        sensors: &[S],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ArtifactGroups, SensorFetchError> {
        info!(
            "Downloading data between {start} and {end} into {}",
            self.fetcher.output_dir().display()
        );
        let mut sorted: Vec<&str> = sensors.iter().map(AsRef::as_ref).collect();
        sorted.sort_unstable();

        let mut groups = ArtifactGroups::new();
        for sensor in sorted {
            let report = fetch_sensor(&self.fetcher, sensor, start, end).await?;
            groups.push(category(sensor), report.successful_paths());
        }
        Ok(groups)
    }

    /// Fetches the last `days` days up to and including today, so `days + 1`
    /// dates per sensor.
    pub async fn fetch_last_days<S: AsRef<str>>(
        &self,
        sensors: &[S],
        days: u64,
    ) -> Result<ArtifactGroups, SensorFetchError> {
        let end = Local::now().date_naive();
        let start = end - Duration::days(days as i64);
        self.fetch_batch(sensors, start, end).await
    }

    /// Runs the batch a [`FetchConfig`] describes.
    pub async fn fetch_configured(
        &self,
        config: &FetchConfig,
    ) -> Result<ArtifactGroups, SensorFetchError> {
        self.fetch_last_days(&config.sensors_names, config.days).await
    }

    /// Assembles one series per sensor of `category` from a finished batch,
    /// reading the named CSV `column`.
    ///
    /// A category that was never requested, or for which nothing was
    /// fetched, is a visible [`SeriesError::NoArtifacts`] outcome rather
    /// than an empty chart. A caller charting several `(category, column)`
    /// pairs can treat that error as per-request and carry on with the rest.
    ///
    /// [`SeriesError::NoArtifacts`]: crate::SeriesError::NoArtifacts
    pub fn series_for(
        &self,
        groups: &ArtifactGroups,
        category: &str,
        column: &str,
    ) -> Result<Vec<Series>, SensorFetchError> {
        let lists = groups.get(category).unwrap_or_default();
        Ok(assemble_group(category, lists, column)?)
    }
}
