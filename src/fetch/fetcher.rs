use crate::fetch::error::FetchError;
use crate::types::outcome::FetchOutcome;
use chrono::NaiveDate;
use futures_util::TryStreamExt;
use log::{debug, warn};
use reqwest::Client;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio_util::io::StreamReader;

const DEFAULT_ARCHIVE_BASE: &str = "https://archive.sensor.community";

/// Fetches one day of data for one sensor from the archive, backed by a
/// local file cache in the output directory.
///
/// Artifact naming is deterministic per `(date, sensor)`, which is what
/// makes the existence probe a correct cache and lets concurrent fetches for
/// distinct pairs share the directory without locking.
#[derive(Debug, Clone)]
pub struct ArchiveFetcher {
    client: Client,
    archive_base: String,
    output_dir: PathBuf,
}

impl ArchiveFetcher {
    pub fn new(output_dir: &Path) -> Self {
        Self::with_archive_base(output_dir, DEFAULT_ARCHIVE_BASE)
    }

    /// Points the fetcher at a different archive root. Used by tests; the
    /// public client defaults to the sensor.community archive.
    pub fn with_archive_base(output_dir: &Path, archive_base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            archive_base: archive_base.into(),
            output_dir: output_dir.to_path_buf(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// The local path an artifact for this `(date, sensor)` pair lives at:
    /// `{output_dir}/{YYYY-MM-DD}_{sensor}.csv`.
    pub fn artifact_path(&self, date: NaiveDate, sensor: &str) -> PathBuf {
        self.output_dir.join(format!("{date}_{sensor}.csv"))
    }

    /// The archive address for this `(date, sensor)` pair:
    /// `{base}/{YYYY-MM-DD}/{YYYY-MM-DD}_{sensor}.csv`.
    pub fn archive_url(&self, date: NaiveDate, sensor: &str) -> String {
        format!("{}/{date}/{date}_{sensor}.csv", self.archive_base)
    }

    /// Whether the artifact for this pair is already on disk. An I/O error
    /// probing the path reads as "absent", so the worst case is a re-fetch.
    pub fn is_cached(&self, date: NaiveDate, sensor: &str) -> bool {
        self.artifact_path(date, sensor).exists()
    }

    /// Fetches one `(date, sensor)` artifact, skipping the network entirely
    /// when it is already cached. A single attempt is made; any failure is
    /// folded into [`FetchOutcome::Failure`] carrying the attempted address,
    /// so one bad date never aborts its siblings.
    pub async fn fetch(&self, date: NaiveDate, sensor: &str) -> FetchOutcome {
        let path = self.artifact_path(date, sensor);
        if self.is_cached(date, sensor) {
            debug!("Cache hit for {sensor} on {date} at {path:?}");
            return FetchOutcome::Success { date, path };
        }
        let url = self.archive_url(date, sensor);
        match self.download(&url, &path).await {
            Ok(()) => FetchOutcome::Success { date, path },
            Err(reason) => {
                warn!("Fetch failed for {url}: {reason}");
                FetchOutcome::Failure { date, url, reason }
            }
        }
    }

    /// Streams the response body to `path`, overwriting any partial file
    /// from an earlier run. A zero-byte response counts as a failure and the
    /// empty file is removed.
    async fn download(&self, url: &str, path: &Path) -> Result<(), FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                return Err(if let Some(status) = e.status() {
                    FetchError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    FetchError::Network(url.to_string(), e)
                });
            }
        };

        let stream = response
            .bytes_stream()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e));
        let mut reader = StreamReader::new(stream);
        let mut file = fs::File::create(path)
            .await
            .map_err(|e| FetchError::ArtifactWrite(path.to_path_buf(), e))?;
        let written = tokio::io::copy(&mut reader, &mut file)
            .await
            .map_err(|e| FetchError::ArtifactWrite(path.to_path_buf(), e))?;
        file.flush()
            .await
            .map_err(|e| FetchError::ArtifactWrite(path.to_path_buf(), e))?;
        drop(file);

        if written == 0 {
            let _ = fs::remove_file(path).await;
            return Err(FetchError::EmptyBody(url.to_string()));
        }
        debug!("Downloaded {written} bytes from {url} to {path:?}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // An address nothing listens on; any request against it fails fast with
    // a transport error instead of touching the real archive.
    const UNROUTABLE_BASE: &str = "http://127.0.0.1:9";

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn artifact_path_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = ArchiveFetcher::new(dir.path());
        let path = fetcher.artifact_path(date(2020, 6, 1), "sds011_43258");
        assert_eq!(path, dir.path().join("2020-06-01_sds011_43258.csv"));
        assert_eq!(path, fetcher.artifact_path(date(2020, 6, 1), "sds011_43258"));
    }

    #[test]
    fn archive_url_matches_archive_layout() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = ArchiveFetcher::new(dir.path());
        assert_eq!(
            fetcher.archive_url(date(2020, 6, 1), "sds011_43258"),
            "https://archive.sensor.community/2020-06-01/2020-06-01_sds011_43258.csv"
        );
    }

    #[test]
    fn probe_fails_open_for_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = ArchiveFetcher::new(dir.path());
        assert!(!fetcher.is_cached(date(2020, 6, 1), "sds011_43258"));
    }

    #[tokio::test]
    async fn cached_artifact_skips_the_network() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = ArchiveFetcher::with_archive_base(dir.path(), UNROUTABLE_BASE);
        let d = date(2020, 6, 1);
        let expected = fetcher.artifact_path(d, "sds011_43258");
        std::fs::write(&expected, "timestamp;P1\n").unwrap();

        // The archive base is unroutable, so a network attempt would fail:
        // success here proves the cache short-circuit.
        let first = fetcher.fetch(d, "sds011_43258").await;
        let second = fetcher.fetch(d, "sds011_43258").await;
        for outcome in [first, second] {
            match outcome {
                FetchOutcome::Success { path, .. } => assert_eq!(path, expected),
                FetchOutcome::Failure { url, .. } => panic!("unexpected fetch of {url}"),
            }
        }
    }

    #[tokio::test]
    async fn transport_error_becomes_failure_with_the_attempted_url() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = ArchiveFetcher::with_archive_base(dir.path(), UNROUTABLE_BASE);
        let d = date(2020, 6, 1);

        match fetcher.fetch(d, "sds011_43258").await {
            FetchOutcome::Failure { date, url, reason } => {
                assert_eq!(date, d);
                assert_eq!(
                    url,
                    format!("{UNROUTABLE_BASE}/2020-06-01/2020-06-01_sds011_43258.csv")
                );
                assert!(matches!(reason, FetchError::Network(..)));
            }
            FetchOutcome::Success { path, .. } => panic!("unexpected success at {path:?}"),
        }
        assert!(!fetcher.is_cached(d, "sds011_43258"));
    }
}
