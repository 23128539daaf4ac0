pub mod data;
pub mod models;

pub use data::ProblemPayload;
pub use models::{CachedHints, Problem, ScrapedProblem};
