mod config;
mod error;
mod fetch;
mod sensorfetch;
mod series;
mod types;
mod utils;

pub use error::SensorFetchError;
pub use sensorfetch::*;

pub use config::{ConfigError, FetchConfig};

pub use fetch::error::FetchError;
pub use fetch::fetcher::ArchiveFetcher;
pub use fetch::scheduler::fetch_sensor;

pub use series::assembler::{assemble_group, assemble_series};
pub use series::error::SeriesError;

pub use types::date_range::DateRange;
pub use types::outcome::{ArtifactGroups, FetchOutcome, SensorReport};
pub use types::sensor::category;
pub use types::series::{Series, TimeSeriesPoint};
