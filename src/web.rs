#![cfg(not(tarpaulin_include))]

use attrition::{Config, Dashboard, app, load};
use log::info;

/// Entry point of the dashboard server
///
/// Loads the dataset, builds every derived view and static chart, then serves
/// the dashboard until interrupted. Any data problem aborts startup.
///
/// # Arguments
/// * `[dataset.csv] [bind-address]`, falling back to `ATTRITION_DATASET` /
///   `ATTRITION_ADDR` and then `ibm_emp_att_dataset.csv` / `127.0.0.1:3000`
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    info!("Loading {}", config.dataset_path.display());

    let table = load(&config.dataset_path)?;
    let dashboard = Dashboard::build(&table)?;

    app::run(config, dashboard).await
}
