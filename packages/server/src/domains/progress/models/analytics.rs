//! Read-side aggregates over progress records.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::common::{CompletionStatus, Difficulty, Platform, ProblemId, ProgressId};

/// All-time totals for one user. Zeros when the user has no records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LearningStats {
    pub total_problems: i64,
    pub total_hints_used: i64,
    pub total_debug_sessions: i64,
    pub total_time_spent_ms: i64,
    pub completed_problems: i64,
    pub average_helpfulness: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub problems_viewed: i64,
    pub hints_used: i64,
    pub debug_sessions: i64,
    pub time_spent_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PlatformBreakdown {
    pub platform: Platform,
    pub problems_viewed: i64,
    pub hints_used: i64,
    pub debug_sessions: i64,
    pub average_time_spent_ms: f64,
}

/// Usage across every user, per platform.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    pub platform: Platform,
    pub total_sessions: i64,
    pub total_hints_used: i64,
    pub total_debug_sessions: i64,
    pub average_time_spent_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentProblem {
    pub id: ProblemId,
    pub title: String,
    pub platform: Platform,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentProgress {
    pub id: ProgressId,
    pub problem: RecentProblem,
    pub platform: Platform,
    pub hints_used: i32,
    pub debug_sessions: i32,
    pub completion_status: CompletionStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct RecentProgressRow {
    id: ProgressId,
    problem_id: ProblemId,
    title: String,
    problem_platform: Platform,
    difficulty: Difficulty,
    platform: Platform,
    hints_used: i32,
    debug_sessions: i32,
    completion_status: CompletionStatus,
    created_at: DateTime<Utc>,
}

impl From<RecentProgressRow> for RecentProgress {
    fn from(row: RecentProgressRow) -> Self {
        Self {
            id: row.id,
            problem: RecentProblem {
                id: row.problem_id,
                title: row.title,
                platform: row.problem_platform,
                difficulty: row.difficulty,
            },
            platform: row.platform,
            hints_used: row.hints_used,
            debug_sessions: row.debug_sessions,
            completion_status: row.completion_status,
            created_at: row.created_at,
        }
    }
}

pub const MAX_RECENT_PROGRESS: i64 = 50;

impl LearningStats {
    pub async fn for_user(user_id: &str, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, LearningStats>(
            r#"
            SELECT
                COUNT(*)::BIGINT AS total_problems,
                COALESCE(SUM(hints_used), 0)::BIGINT AS total_hints_used,
                COALESCE(SUM(debug_sessions), 0)::BIGINT AS total_debug_sessions,
                COALESCE(SUM(time_spent_ms), 0)::BIGINT AS total_time_spent_ms,
                COUNT(*) FILTER (WHERE completion_status = 'completed')::BIGINT AS completed_problems,
                COALESCE(AVG(helpfulness_rating), 0)::FLOAT8 AS average_helpfulness
            FROM progress
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}

impl DailyActivity {
    /// Activity per UTC day inside the window, oldest first.
    pub async fn for_user(
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, DailyActivity>(
            r#"
            SELECT
                (created_at AT TIME ZONE 'UTC')::DATE AS date,
                COUNT(*)::BIGINT AS problems_viewed,
                COALESCE(SUM(hints_used), 0)::BIGINT AS hints_used,
                COALESCE(SUM(debug_sessions), 0)::BIGINT AS debug_sessions,
                COALESCE(SUM(time_spent_ms), 0)::BIGINT AS time_spent_ms
            FROM progress
            WHERE user_id = $1 AND created_at >= $2 AND created_at <= $3
            GROUP BY date
            ORDER BY date ASC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Distinct UTC days on which the user created a progress record,
    /// newest first.
    pub async fn active_days(user_id: &str, pool: &PgPool) -> Result<Vec<NaiveDate>> {
        sqlx::query_scalar::<_, NaiveDate>(
            r#"
            SELECT DISTINCT (created_at AT TIME ZONE 'UTC')::DATE AS day
            FROM progress
            WHERE user_id = $1
            ORDER BY day DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}

impl PlatformBreakdown {
    /// Per-platform activity inside the window, most viewed first.
    pub async fn for_user(
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, PlatformBreakdown>(
            r#"
            SELECT
                platform,
                COUNT(*)::BIGINT AS problems_viewed,
                COALESCE(SUM(hints_used), 0)::BIGINT AS hints_used,
                COALESCE(SUM(debug_sessions), 0)::BIGINT AS debug_sessions,
                COALESCE(AVG(time_spent_ms), 0)::FLOAT8 AS average_time_spent_ms
            FROM progress
            WHERE user_id = $1 AND created_at >= $2 AND created_at <= $3
            GROUP BY platform
            ORDER BY problems_viewed DESC, platform
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}

impl PlatformStats {
    pub async fn all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, PlatformStats>(
            r#"
            SELECT
                platform,
                COUNT(*)::BIGINT AS total_sessions,
                COALESCE(SUM(hints_used), 0)::BIGINT AS total_hints_used,
                COALESCE(SUM(debug_sessions), 0)::BIGINT AS total_debug_sessions,
                COALESCE(AVG(time_spent_ms), 0)::FLOAT8 AS average_time_spent_ms
            FROM progress
            GROUP BY platform
            ORDER BY total_sessions DESC, platform
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}

impl RecentProgress {
    /// Newest records inside the window, with their problem.
    pub async fn for_user(
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let rows = sqlx::query_as::<_, RecentProgressRow>(
            r#"
            SELECT
                pr.id,
                pr.problem_id,
                p.title,
                p.platform AS problem_platform,
                p.difficulty,
                pr.platform,
                pr.hints_used,
                pr.debug_sessions,
                pr.completion_status,
                pr.created_at
            FROM progress pr
            JOIN problems p ON p.id = pr.problem_id
            WHERE pr.user_id = $1 AND pr.created_at >= $2 AND pr.created_at <= $3
            ORDER BY pr.created_at DESC
            LIMIT $4
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .bind(MAX_RECENT_PROGRESS)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
