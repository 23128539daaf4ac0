pub mod dashboard;
pub mod track;

pub use dashboard::{leaderboard, platform_stats, user_dashboard, Dashboard, Leaderboard};
pub use track::{complete_problem, record_debug_session, record_problem_view, reveal_hint};
