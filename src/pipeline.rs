//! Sequences provisioning, schema creation and the two dataset loads.

use anyhow::Result;
use log::info;

use crate::fetch::{Endpoint, Fetch};
use crate::parser::{parse_competitions_json, parse_covid_json, select_competitions};
use crate::schema::ALL_TABLES;
use crate::writer::{create_database, DatabaseLocation, Store};

/// Everything a run needs
#[derive(Debug, Clone)]
pub struct Config {
    pub new_database: bool,
    pub new_table: bool,
    pub location: DatabaseLocation,
    pub covid: Endpoint,
    pub competitions: Endpoint,
    /// Wrap both inserts in one transaction
    pub atomic: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub countries: usize,
    pub competitions: usize,
}

/// Fetch the epidemiological dataset, insert it, and return the stored country names
pub fn load_covid(store: &mut Store, source: &impl Fetch, endpoint: &Endpoint) -> Result<Vec<String>> {
    let body = source.fetch(endpoint)?;
    let batch = parse_covid_json(&body)?;

    let inserted = store.insert_rows(&batch.records)?;
    info!("Inserted {} rows into Covid19", inserted);

    Ok(batch.country_names)
}

/// Fetch competitions, keep those in a known country, insert them
pub fn load_competitions(
    store: &mut Store,
    source: &impl Fetch,
    endpoint: &Endpoint,
    country_names: &[String],
) -> Result<usize> {
    let body = source.fetch(endpoint)?;
    let response = parse_competitions_json(&body)?;
    let total = response.competitions.len();
    let rows = select_competitions(response, country_names);

    let inserted = store.insert_rows(&rows)?;
    info!(
        "Inserted {} rows into Competitions ({} without a matching country)",
        inserted,
        total - inserted
    );

    Ok(inserted)
}

pub fn run(config: &Config, source: &impl Fetch) -> Result<RunSummary> {
    if config.new_database {
        create_database(&config.location)?;
    }

    let mut store = Store::connect(&config.location)?;

    if config.new_table {
        store.create_tables(ALL_TABLES)?;
    }

    let load = |store: &mut Store| -> Result<RunSummary> {
        let country_names = load_covid(store, source, &config.covid)?;
        let competitions =
            load_competitions(store, source, &config.competitions, &country_names)?;
        Ok(RunSummary {
            countries: country_names.len(),
            competitions,
        })
    };

    if config.atomic {
        store.atomic(load)
    } else {
        load(&mut store)
    }
}
