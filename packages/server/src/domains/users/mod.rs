pub mod data;
pub mod models;

pub use data::PreferencesPayload;
pub use models::{PreferencesUpdate, User};
