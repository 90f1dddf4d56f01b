//! demos/fetch_last_week.rs
//!
//! Fetches the last week of archive data for a couple of sensors and prints
//! what ended up grouped per category.
//!
//! To run: cargo run --example fetch_last_week

use sensorfetch::SensorFetch;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let client = SensorFetch::new().await?;

    let sensors = ["sds011_43258", "dht22_43259"];
    let groups = client.fetch_last_days(&sensors, 7).await?;

    for (category, lists) in groups.iter() {
        let files: usize = lists.iter().map(Vec::len).sum();
        println!("{category}: {} sensor(s), {files} file(s)", lists.len());
    }
    Ok(())
}
