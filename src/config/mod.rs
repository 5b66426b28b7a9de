pub mod cli;

use crate::core::{ConfigProvider, OnError};
use crate::utils::validation::{
    validate_endpoint_template, validate_file_extensions, validate_path, validate_positive_number,
    validate_url, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "lfl-etl")]
#[command(about = "Little Free Library location scraper")]
pub struct CliConfig {
    #[arg(
        long,
        default_value = "https://appapi.littlefreelibrary.org/library/pin.json"
    )]
    pub listing_endpoint: String,

    /// Detail endpoint template, {id} is substituted per record
    #[arg(
        long,
        default_value = "https://appapi.littlefreelibrary.org/libraries/{id}.json"
    )]
    pub detail_endpoint: String,

    #[arg(long, default_value = "100000")]
    pub page_size: usize,

    #[arg(long, default_value = ".")]
    pub output_path: String,

    #[arg(long, default_value = "locations.csv")]
    pub locations_file: String,

    #[arg(long, default_value = "libraries.csv")]
    pub libraries_file: String,

    /// Stop after this many successful detail lookups (0 = no cap)
    #[arg(long, default_value = "10")]
    pub max_records: usize,

    /// Reaction to a non-200 detail response: abort, skip or retry
    #[arg(long, default_value = "abort", value_parser = parse_on_error)]
    pub on_error: OnError,

    #[arg(long, default_value = "3")]
    pub retry_attempts: usize,

    #[arg(long, default_value = "500")]
    pub retry_delay_ms: u64,

    #[arg(long, default_value = "30")]
    pub timeout_seconds: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system resource monitoring")]
    pub monitor: bool,
}

fn parse_on_error(s: &str) -> std::result::Result<OnError, String> {
    s.parse()
}

impl ConfigProvider for CliConfig {
    fn listing_endpoint(&self) -> &str {
        &self.listing_endpoint
    }

    fn detail_endpoint(&self) -> &str {
        &self.detail_endpoint
    }

    fn page_size(&self) -> usize {
        self.page_size
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn locations_file(&self) -> &str {
        &self.locations_file
    }

    fn libraries_file(&self) -> &str {
        &self.libraries_file
    }

    fn max_records(&self) -> Option<usize> {
        if self.max_records == 0 {
            None
        } else {
            Some(self.max_records)
        }
    }

    fn on_error(&self) -> OnError {
        self.on_error
    }

    fn retry_attempts(&self) -> usize {
        self.retry_attempts
    }

    fn retry_delay_ms(&self) -> u64 {
        self.retry_delay_ms
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        validate_url("listing_endpoint", &self.listing_endpoint)?;
        validate_endpoint_template("detail_endpoint", &self.detail_endpoint, "{id}")?;
        validate_positive_number("page_size", self.page_size, 1)?;
        validate_path("output_path", &self.output_path)?;
        validate_file_extensions(
            "output_files",
            &[self.locations_file.clone(), self.libraries_file.clone()],
            &["csv"],
        )?;
        Ok(())
    }
}
