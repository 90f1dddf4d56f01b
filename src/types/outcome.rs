use crate::fetch::error::FetchError;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The result of one fetch attempt for a `(date, sensor)` pair.
///
/// Both variants carry the date they were attempted for, so a batch of
/// concurrently completed outcomes can be re-sorted into calendar order.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The artifact is on disk, either freshly downloaded or already cached.
    Success { date: NaiveDate, path: PathBuf },
    /// The fetch failed; carries the address that was attempted and why.
    Failure {
        date: NaiveDate,
        url: String,
        reason: FetchError,
    },
}

impl FetchOutcome {
    pub fn date(&self) -> NaiveDate {
        match self {
            FetchOutcome::Success { date, .. } => *date,
            FetchOutcome::Failure { date, .. } => *date,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success { .. })
    }
}

/// Per-sensor fetch report: one [`FetchOutcome`] per date in the requested
/// range, ascending by date regardless of completion order. Immutable once
/// built by the scheduler.
#[derive(Debug)]
pub struct SensorReport {
    sensor: String,
    outcomes: Vec<FetchOutcome>,
}

impl SensorReport {
    /// Sorts the outcomes ascending by date. The scheduler hands completions
    /// over in whatever order the tasks finished.
    pub(crate) fn new(sensor: &str, mut outcomes: Vec<FetchOutcome>) -> Self {
        outcomes.sort_by_key(FetchOutcome::date);
        Self {
            sensor: sensor.to_string(),
            outcomes,
        }
    }

    pub fn sensor(&self) -> &str {
        &self.sensor
    }

    pub fn outcomes(&self) -> &[FetchOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// The paths of the successful fetches, in ascending date order; failed
    /// dates are skipped.
    pub fn successful_paths(&self) -> Vec<PathBuf> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                FetchOutcome::Success { path, .. } => Some(path.clone()),
                FetchOutcome::Failure { .. } => None,
            })
            .collect()
    }
}

/// Successfully fetched artifacts, grouped by sensor category.
///
/// Each category maps to one artifact list per sensor of that category, in
/// the order the orchestrator processed the sensors (lexicographic by
/// identifier). Append-only while the batch runs, read-only afterwards.
#[derive(Debug, Default)]
pub struct ArtifactGroups {
    groups: BTreeMap<String, Vec<Vec<PathBuf>>>,
}

impl ArtifactGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, category: &str, paths: Vec<PathBuf>) {
        self.groups.entry(category.to_string()).or_default().push(paths);
    }

    /// The per-sensor artifact lists for one category, if any sensor of that
    /// category was part of the batch.
    pub fn get(&self, category: &str) -> Option<&[Vec<PathBuf>]> {
        self.groups.get(category).map(Vec::as_slice)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Vec<PathBuf>])> {
        self.groups
            .iter()
            .map(|(category, lists)| (category.as_str(), lists.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn success(y: i32, m: u32, d: u32, path: &str) -> FetchOutcome {
        FetchOutcome::Success {
            date: date(y, m, d),
            path: PathBuf::from(path),
        }
    }

    fn failure(y: i32, m: u32, d: u32, url: &str) -> FetchOutcome {
        FetchOutcome::Failure {
            date: date(y, m, d),
            url: url.to_string(),
            reason: FetchError::EmptyBody(url.to_string()),
        }
    }

    #[test]
    fn report_sorts_outcomes_ascending_by_date() {
        let report = SensorReport::new(
            "sds011_43258",
            vec![
                success(2020, 6, 3, "c.csv"),
                success(2020, 6, 1, "a.csv"),
                success(2020, 6, 2, "b.csv"),
            ],
        );
        let dates: Vec<_> = report.outcomes().iter().map(FetchOutcome::date).collect();
        assert_eq!(
            dates,
            vec![date(2020, 6, 1), date(2020, 6, 2), date(2020, 6, 3)]
        );
    }

    #[test]
    fn successful_paths_skip_failed_dates_and_keep_order() {
        let report = SensorReport::new(
            "sds011_43258",
            vec![
                success(2020, 6, 3, "c.csv"),
                failure(2020, 6, 2, "http://unreachable/b.csv"),
                success(2020, 6, 1, "a.csv"),
            ],
        );
        assert_eq!(report.len(), 3);
        assert_eq!(
            report.successful_paths(),
            vec![PathBuf::from("a.csv"), PathBuf::from("c.csv")]
        );
    }

    #[test]
    fn groups_keep_per_sensor_lists_in_insertion_order() {
        let mut groups = ArtifactGroups::new();
        groups.push("sds011", vec![PathBuf::from("x_sds011_43258.csv")]);
        groups.push("dht22", vec![PathBuf::from("x_dht22_43259.csv")]);
        groups.push("sds011", vec![PathBuf::from("x_sds011_43295.csv")]);

        let categories: Vec<_> = groups.categories().collect();
        assert_eq!(categories, vec!["dht22", "sds011"]);

        let sds011 = groups.get("sds011").unwrap();
        assert_eq!(sds011.len(), 2);
        assert_eq!(sds011[0], vec![PathBuf::from("x_sds011_43258.csv")]);
        assert_eq!(sds011[1], vec![PathBuf::from("x_sds011_43295.csv")]);
        assert!(groups.get("bme280").is_none());
    }
}
