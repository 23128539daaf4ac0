pub mod analytics;
pub mod leaderboard;
pub mod progress;
pub mod streak;

pub use analytics::{
    DailyActivity, LearningStats, PlatformBreakdown, PlatformStats, RecentProblem, RecentProgress,
};
pub use leaderboard::{
    leaderboard_score, rank_leaderboard, LeaderboardEntry, LeaderboardTotals,
    DEFAULT_LEADERBOARD_LIMIT, MAX_LEADERBOARD_LIMIT,
};
pub use progress::{DebugSession, HintReveal, Progress};
pub use streak::calculate_streak;
