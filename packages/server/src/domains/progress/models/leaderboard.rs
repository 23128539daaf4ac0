use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use std::cmp::Ordering;

use crate::common::Platform;

pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;
pub const MAX_LEADERBOARD_LIMIT: usize = 100;

/// Per-user totals on one platform.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct LeaderboardTotals {
    pub user_id: String,
    pub total_problems: i64,
    pub completed_problems: i64,
    pub total_hints_used: i64,
    pub total_debug_sessions: i64,
    pub average_helpfulness: f64,
    pub last_active: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub user_id: String,
    pub total_problems: i64,
    pub completed_problems: i64,
    pub total_hints_used: i64,
    pub total_debug_sessions: i64,
    pub average_helpfulness: f64,
    pub score: f64,
    pub last_active: DateTime<Utc>,
}

/// Completions earn 10 points; each hint costs 1 and each debug session 0.5.
pub fn leaderboard_score(completed: i64, hints_used: i64, debug_sessions: i64) -> f64 {
    completed as f64 * 10.0 - hints_used as f64 - debug_sessions as f64 * 0.5
}

/// Score, order and rank users, keeping the top `limit`.
///
/// Ties on score go to the user with more completions, then by user id.
pub fn rank_leaderboard(totals: Vec<LeaderboardTotals>, limit: usize) -> Vec<LeaderboardEntry> {
    let mut scored: Vec<(f64, LeaderboardTotals)> = totals
        .into_iter()
        .map(|t| {
            let score =
                leaderboard_score(t.completed_problems, t.total_hints_used, t.total_debug_sessions);
            (score, t)
        })
        .collect();

    scored.sort_by(|(score_a, a), (score_b, b)| {
        score_b
            .partial_cmp(score_a)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.completed_problems.cmp(&a.completed_problems))
            .then_with(|| a.user_id.cmp(&b.user_id))
    });

    scored
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, (score, t))| LeaderboardEntry {
            rank: index + 1,
            user_id: t.user_id,
            total_problems: t.total_problems,
            completed_problems: t.completed_problems,
            total_hints_used: t.total_hints_used,
            total_debug_sessions: t.total_debug_sessions,
            average_helpfulness: t.average_helpfulness,
            score,
            last_active: t.last_active,
        })
        .collect()
}

impl LeaderboardTotals {
    pub async fn for_platform(platform: Platform, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, LeaderboardTotals>(
            r#"
            SELECT
                user_id,
                COUNT(*)::BIGINT AS total_problems,
                COUNT(*) FILTER (WHERE completion_status = 'completed')::BIGINT AS completed_problems,
                COALESCE(SUM(hints_used), 0)::BIGINT AS total_hints_used,
                COALESCE(SUM(debug_sessions), 0)::BIGINT AS total_debug_sessions,
                COALESCE(AVG(helpfulness_rating), 0)::FLOAT8 AS average_helpfulness,
                MAX(created_at) AS last_active
            FROM progress
            WHERE platform = $1
            GROUP BY user_id
            "#,
        )
        .bind(platform)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
