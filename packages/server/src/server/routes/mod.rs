pub mod feedback;
pub mod health;
pub mod hints;
pub mod progress;
pub mod users;

pub use feedback::*;
pub use health::*;
pub use hints::*;
pub use progress::*;
pub use users::*;
