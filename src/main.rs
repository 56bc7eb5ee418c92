use anyhow::Result;
use api2sql::{cli::Cli, fetch::ApiClient, pipeline::run, Config};
use log::info;
use std::time::Instant;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from(Cli::parse_args());
    let start = Instant::now();

    let client = ApiClient::new()?;
    let summary = run(&config, &client)?;

    info!(
        "Loaded {} countries and {} competitions into {:?} in {:.1}s",
        summary.countries,
        summary.competitions,
        config.location.path(),
        start.elapsed().as_secs_f64()
    );

    Ok(())
}
