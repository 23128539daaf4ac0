//! Learner dashboard, leaderboard and platform aggregates.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::debug;

use crate::common::Platform;
use crate::domains::progress::models::{
    calculate_streak, rank_leaderboard, DailyActivity, LeaderboardEntry, LeaderboardTotals,
    LearningStats, PlatformBreakdown, PlatformStats, RecentProgress,
};
use crate::domains::users::models::{UserPreferences, UserStats};
use crate::domains::users::User;
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    pub preferences: UserPreferences,
    pub stats: UserStats,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id.clone(),
            created_at: user.created_at,
            last_active: user.last_active,
            preferences: user.preferences(),
            stats: user.stats(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub days: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub user: UserSummary,
    pub period: Period,
    pub overall: LearningStats,
    pub recent: Vec<RecentProgress>,
    pub daily_activity: Vec<DailyActivity>,
    pub platform_breakdown: Vec<PlatformBreakdown>,
    pub streak: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    pub platform: Platform,
    pub leaderboard: Vec<LeaderboardEntry>,
}

/// Everything the popup shows for one user over the last `days` days.
pub async fn user_dashboard(user_id: &str, days: i64, deps: &ServerDeps) -> Result<Dashboard> {
    let pool = &deps.db_pool;
    let end_date = Utc::now();
    let start_date = end_date - Duration::days(days);

    let mut user = User::find_or_create(user_id, pool).await?;

    let overall = LearningStats::for_user(user_id, pool).await?;
    let recent = RecentProgress::for_user(user_id, start_date, end_date, pool).await?;
    let daily_activity = DailyActivity::for_user(user_id, start_date, end_date, pool).await?;
    let platform_breakdown = PlatformBreakdown::for_user(user_id, start_date, end_date, pool).await?;

    let active_days = DailyActivity::active_days(user_id, pool).await?;
    let streak = calculate_streak(&active_days, end_date.date_naive());
    if streak != user.streak_days {
        User::set_streak(user_id, streak, pool).await?;
        user.streak_days = streak;
    }

    debug!(user_id, days, streak, recent = recent.len(), "Built dashboard");

    Ok(Dashboard {
        user: UserSummary::from(&user),
        period: Period {
            days,
            start_date,
            end_date,
        },
        overall,
        recent,
        daily_activity,
        platform_breakdown,
        streak,
    })
}

pub async fn leaderboard(platform: Platform, limit: usize, deps: &ServerDeps) -> Result<Leaderboard> {
    let totals = LeaderboardTotals::for_platform(platform, &deps.db_pool).await?;
    Ok(Leaderboard {
        platform,
        leaderboard: rank_leaderboard(totals, limit),
    })
}

pub async fn platform_stats(deps: &ServerDeps) -> Result<Vec<PlatformStats>> {
    PlatformStats::all(&deps.db_pool).await
}
