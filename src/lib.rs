pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, CliConfig};
pub use core::{details::DetailsPipeline, etl::EtlEngine, locations::LocationsPipeline};
pub use utils::error::{EtlError, Result};
