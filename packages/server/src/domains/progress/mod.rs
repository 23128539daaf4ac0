pub mod activities;
pub mod data;
pub mod models;

pub use models::Progress;
