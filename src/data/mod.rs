//! Data module - dataset loading and the in-memory delivery table.

mod dataset;
mod loader;

pub use dataset::{Dataset, Phase, MIDDLE_LAST_OVER, POWERPLAY_LAST_OVER};
pub use loader::{load_dataset, DataError};
