pub mod cli;
pub mod fetch;
pub mod parser;
pub mod pipeline;
pub mod schema;
pub mod writer;

pub use cli::Cli;
pub use pipeline::{run, Config, RunSummary};
