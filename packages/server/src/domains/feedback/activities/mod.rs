pub mod generate;
pub mod rate;

pub use generate::generate_feedback;
pub use rate::rate_feedback;
