pub mod details;
pub mod etl;
pub mod locations;
pub mod probe;

pub use crate::domain::model::{Extraction, Halt, OnError, Record, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::domain::schema::{DETAIL_PROJECTION, PIN_PROJECTION};
pub use crate::utils::error::Result;
