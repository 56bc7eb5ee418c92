use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::fetch::{Endpoint, COMPETITIONS_URL, COVID_URL};
use crate::pipeline::Config;
use crate::writer::{validate_db_name, DatabaseLocation};

#[derive(Parser, Debug)]
#[command(name = "api2sql")]
#[command(
    version,
    about = "Fetch data from two public APIs into SQLite",
    long_about = "Fetch data from two public APIs into SQLite.\n\n\
        Databases are files in --data-dir (alias --server). The SQL Server \
        options --port, --user and --password do not apply and are rejected."
)]
pub struct Cli {
    /// Create a new database
    #[arg(
        long = "newDatabase",
        num_args = 0..=1,
        default_value_t = false,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub new_database: bool,

    /// Create the Covid19 and Competitions tables
    #[arg(
        long = "newTable",
        num_args = 0..=1,
        default_value_t = true,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub new_table: bool,

    /// Database name
    #[arg(long = "db_name", default_value = "API2SQL", value_parser = parse_db_name)]
    pub db_name: String,

    /// Directory holding the database files
    #[arg(long, alias = "server", env = "API2SQL_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Epidemiological API endpoint
    #[arg(long, env = "COVID_API_URL", default_value = COVID_URL)]
    pub covid_url: String,

    /// Football competitions API endpoint
    #[arg(long, env = "COMPETITIONS_API_URL", default_value = COMPETITIONS_URL)]
    pub competitions_url: String,

    /// football-data.org API token
    #[arg(long, env = "FOOTBALL_DATA_TOKEN", hide_env_values = true)]
    pub football_token: Option<String>,

    /// Roll back both inserts if either fails
    #[arg(long)]
    pub atomic: bool,
}

fn parse_db_name(name: &str) -> Result<String, String> {
    validate_db_name(name)
        .map(|_| name.to_string())
        .map_err(|e| e.to_string())
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config {
            new_database: cli.new_database,
            new_table: cli.new_table,
            location: DatabaseLocation::new(cli.data_dir, cli.db_name),
            covid: Endpoint::covid(cli.covid_url),
            competitions: Endpoint::competitions(cli.competitions_url, cli.football_token),
            atomic: cli.atomic,
        }
    }
}
