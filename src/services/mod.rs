pub mod prediction;
pub mod query;

pub use prediction::Predictor;
pub use query::QueryService;
