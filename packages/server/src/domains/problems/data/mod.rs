pub mod problem;

pub use problem::{ProblemMetadataPayload, ProblemPayload};
