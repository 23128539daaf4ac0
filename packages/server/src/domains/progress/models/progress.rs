use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use crate::common::{CompletionStatus, DebugSessionId, HintRevealId, Platform, ProblemId, ProgressId};

/// One user's learning record for one problem.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub id: ProgressId,
    pub user_id: String,
    pub problem_id: ProblemId,
    pub platform: Platform,
    pub problem_title: String,

    // Session
    pub time_spent_ms: i64,
    pub session_start: DateTime<Utc>,
    pub session_end: Option<DateTime<Utc>>,

    // Learning metrics
    pub hints_used: i32,
    pub debug_sessions: i32,
    pub completion_status: CompletionStatus,
    pub difficulty_rating: Option<i16>,
    pub helpfulness_rating: Option<i16>,
    pub feedback_comment: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A hint the user revealed while working on a problem.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HintReveal {
    pub id: HintRevealId,
    pub progress_id: ProgressId,
    pub hint_index: i32,
    pub revealed_at: DateTime<Utc>,
}

/// A debug feedback request made while working on a problem.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DebugSession {
    pub id: DebugSessionId,
    pub progress_id: ProgressId,
    pub code_length: i32,
    pub feedback_received: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct RecordedView {
    #[sqlx(flatten)]
    progress: Progress,
    inserted: bool,
}

impl Progress {
    pub async fn find(user_id: &str, problem_id: ProblemId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Progress>(
            "SELECT * FROM progress WHERE user_id = $1 AND problem_id = $2",
        )
        .bind(user_id)
        .bind(problem_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Start a session on a problem, creating the record on first view.
    ///
    /// Returns the record and whether it was newly created.
    pub async fn record_view(
        user_id: &str,
        problem_id: ProblemId,
        platform: Platform,
        problem_title: &str,
        pool: &PgPool,
    ) -> Result<(Self, bool)> {
        Self::upsert(user_id, problem_id, platform, problem_title, true, pool).await
    }

    /// Fetch the record, creating it if needed, without restarting the
    /// current session.
    pub async fn find_or_create(
        user_id: &str,
        problem_id: ProblemId,
        platform: Platform,
        problem_title: &str,
        pool: &PgPool,
    ) -> Result<(Self, bool)> {
        Self::upsert(user_id, problem_id, platform, problem_title, false, pool).await
    }

    async fn upsert(
        user_id: &str,
        problem_id: ProblemId,
        platform: Platform,
        problem_title: &str,
        restart_session: bool,
        pool: &PgPool,
    ) -> Result<(Self, bool)> {
        // xmax is 0 only for rows this statement inserted.
        let row = sqlx::query_as::<_, RecordedView>(
            r#"
            INSERT INTO progress (id, user_id, problem_id, platform, problem_title)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, problem_id) DO UPDATE SET
                session_start = CASE WHEN $6 THEN NOW() ELSE progress.session_start END,
                updated_at = NOW()
            RETURNING *, (xmax = 0) AS inserted
            "#,
        )
        .bind(ProgressId::new())
        .bind(user_id)
        .bind(problem_id)
        .bind(platform)
        .bind(problem_title)
        .bind(restart_session)
        .fetch_one(pool)
        .await?;

        Ok((row.progress, row.inserted))
    }

    pub async fn add_revealed_hint(
        id: ProgressId,
        hint_index: i32,
        pool: &PgPool,
    ) -> Result<HintReveal> {
        let mut tx = pool.begin().await?;

        let reveal = sqlx::query_as::<_, HintReveal>(
            r#"
            INSERT INTO hint_reveals (id, progress_id, hint_index)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(HintRevealId::new())
        .bind(id)
        .bind(hint_index)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE progress SET hints_used = hints_used + 1, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(reveal)
    }

    pub async fn add_debug_session(
        id: ProgressId,
        code_length: i32,
        feedback_received: bool,
        pool: &PgPool,
    ) -> Result<DebugSession> {
        let mut tx = pool.begin().await?;

        let session = sqlx::query_as::<_, DebugSession>(
            r#"
            INSERT INTO debug_sessions (id, progress_id, code_length, feedback_received)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(DebugSessionId::new())
        .bind(id)
        .bind(code_length)
        .bind(feedback_received)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE progress SET debug_sessions = debug_sessions + 1, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(session)
    }

    /// Mark completed and close the session; time spent runs from the
    /// session start to now.
    pub async fn complete(id: ProgressId, rating: Option<i16>, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Progress>(
            r#"
            UPDATE progress SET
                completion_status = 'completed',
                helpfulness_rating = COALESCE($2, helpfulness_rating),
                session_end = NOW(),
                time_spent_ms = GREATEST(
                    (EXTRACT(EPOCH FROM (NOW() - session_start)) * 1000)::BIGINT,
                    0
                ),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(rating)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn rate_helpfulness(
        id: ProgressId,
        rating: i16,
        comment: Option<&str>,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Progress>(
            r#"
            UPDATE progress SET
                helpfulness_rating = $2,
                feedback_comment = COALESCE($3, feedback_comment),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(rating)
        .bind(comment)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn hint_reveals(id: ProgressId, pool: &PgPool) -> Result<Vec<HintReveal>> {
        sqlx::query_as::<_, HintReveal>(
            "SELECT * FROM hint_reveals WHERE progress_id = $1 ORDER BY revealed_at, hint_index",
        )
        .bind(id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn debug_session_log(id: ProgressId, pool: &PgPool) -> Result<Vec<DebugSession>> {
        sqlx::query_as::<_, DebugSession>(
            "SELECT * FROM debug_sessions WHERE progress_id = $1 ORDER BY created_at",
        )
        .bind(id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
