pub mod config;
pub mod error;
pub mod models;
pub mod utils;
pub mod store;
pub mod search;

pub use error::{Error, Result};
