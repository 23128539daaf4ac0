use anyhow::Result;
use serde::Serialize;
use sqlx::PgPool;

use crate::common::Platform;

/// Problem-wide hint usage totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HintUsageStats {
    pub total_problems: i64,
    pub total_views: i64,
    pub total_hint_usage: i64,
    pub average_views_per_problem: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PlatformHintUsage {
    pub platform: Platform,
    pub problem_count: i64,
    pub total_views: i64,
    pub total_hint_usage: i64,
}

/// Problem-wide debug feedback totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DebugUsageStats {
    pub total_problems: i64,
    pub total_debug_sessions: i64,
    pub average_debug_sessions_per_problem: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PlatformDebugUsage {
    pub platform: Platform,
    pub problem_count: i64,
    pub total_debug_sessions: i64,
}

// Aggregates over an empty table still return one row (COUNT = 0), so the
// overall queries never need an "all zeros" fallback.

impl HintUsageStats {
    pub async fn overall(pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, HintUsageStats>(
            r#"
            SELECT
                COUNT(*)::BIGINT AS total_problems,
                COALESCE(SUM(view_count), 0)::BIGINT AS total_views,
                COALESCE(SUM(hint_usage_count), 0)::BIGINT AS total_hint_usage,
                COALESCE(AVG(view_count), 0)::FLOAT8 AS average_views_per_problem
            FROM problems
            "#,
        )
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn by_platform(pool: &PgPool) -> Result<Vec<PlatformHintUsage>> {
        sqlx::query_as::<_, PlatformHintUsage>(
            r#"
            SELECT
                platform,
                COUNT(*)::BIGINT AS problem_count,
                COALESCE(SUM(view_count), 0)::BIGINT AS total_views,
                COALESCE(SUM(hint_usage_count), 0)::BIGINT AS total_hint_usage
            FROM problems
            GROUP BY platform
            ORDER BY problem_count DESC, platform
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}

impl DebugUsageStats {
    pub async fn overall(pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, DebugUsageStats>(
            r#"
            SELECT
                COUNT(*)::BIGINT AS total_problems,
                COALESCE(SUM(debug_session_count), 0)::BIGINT AS total_debug_sessions,
                COALESCE(AVG(debug_session_count), 0)::FLOAT8 AS average_debug_sessions_per_problem
            FROM problems
            "#,
        )
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn by_platform(pool: &PgPool) -> Result<Vec<PlatformDebugUsage>> {
        sqlx::query_as::<_, PlatformDebugUsage>(
            r#"
            SELECT
                platform,
                COUNT(*)::BIGINT AS problem_count,
                COALESCE(SUM(debug_session_count), 0)::BIGINT AS total_debug_sessions
            FROM problems
            GROUP BY platform
            ORDER BY problem_count DESC, platform
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
