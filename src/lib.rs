pub mod api;
pub mod clients;
pub mod config;
pub mod dataset;
pub mod error;
pub mod services;
pub mod types;

pub use error::{AppError, Result};
