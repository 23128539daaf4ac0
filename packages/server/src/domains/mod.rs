// Business domains
pub mod feedback;
pub mod hints;
pub mod problems;
pub mod progress;
pub mod users;
