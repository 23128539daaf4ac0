pub mod user;

pub use user::{PreferencesUpdate, User, UserPreferences, UserStats};
