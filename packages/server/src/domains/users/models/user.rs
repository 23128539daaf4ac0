use anyhow::Result;
use chrono::{DateTime, Utc};
use llm_client::Provider;
use serde::Serialize;
use sqlx::PgPool;

use crate::common::Theme;

/// An extension user, identified by the id the extension generates locally.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub user_id: String,

    pub theme: Theme,
    pub hints_enabled: bool,
    pub debug_enabled: bool,
    pub preferred_llm: Option<String>,

    pub total_hints_used: i64,
    pub total_problems_viewed: i64,
    pub total_debug_sessions: i64,
    pub streak_days: i32,

    pub last_active: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub theme: Theme,
    pub hints_enabled: bool,
    pub debug_enabled: bool,
    pub preferred_llm: Option<Provider>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_hints_used: i64,
    pub total_problems_viewed: i64,
    pub total_debug_sessions: i64,
    pub streak_days: i32,
}

/// Partial preference update; `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferencesUpdate {
    pub theme: Option<Theme>,
    pub hints_enabled: Option<bool>,
    pub debug_enabled: Option<bool>,
    pub preferred_llm: Option<Provider>,
}

impl User {
    pub fn preferences(&self) -> UserPreferences {
        UserPreferences {
            theme: self.theme,
            hints_enabled: self.hints_enabled,
            debug_enabled: self.debug_enabled,
            preferred_llm: self.preferred_provider(),
        }
    }

    pub fn stats(&self) -> UserStats {
        UserStats {
            total_hints_used: self.total_hints_used,
            total_problems_viewed: self.total_problems_viewed,
            total_debug_sessions: self.total_debug_sessions,
            streak_days: self.streak_days,
        }
    }

    /// The provider the user explicitly chose, if any.
    pub fn preferred_provider(&self) -> Option<Provider> {
        self.preferred_llm.as_deref().and_then(|p| p.parse().ok())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub async fn find(user_id: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Fetch the user, creating one with default preferences if needed.
    pub async fn find_or_create(user_id: &str, pool: &PgPool) -> Result<Self> {
        // The no-op update makes RETURNING yield the existing row too.
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING *
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn touch(user_id: &str, pool: &PgPool) -> Result<()> {
        sqlx::query("UPDATE users SET last_active = NOW() WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn increment_hints_used(user_id: &str, pool: &PgPool) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                total_hints_used = total_hints_used + 1,
                last_active = NOW()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn increment_problems_viewed(user_id: &str, pool: &PgPool) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                total_problems_viewed = total_problems_viewed + 1,
                last_active = NOW()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn increment_debug_sessions(user_id: &str, pool: &PgPool) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                total_debug_sessions = total_debug_sessions + 1,
                last_active = NOW()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn update_preferences(
        user_id: &str,
        update: &PreferencesUpdate,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                theme = COALESCE($2, theme),
                hints_enabled = COALESCE($3, hints_enabled),
                debug_enabled = COALESCE($4, debug_enabled),
                preferred_llm = COALESCE($5, preferred_llm),
                last_active = NOW(),
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(update.theme)
        .bind(update.hints_enabled)
        .bind(update.debug_enabled)
        .bind(update.preferred_llm.map(|p| p.as_str()))
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn set_streak(user_id: &str, streak_days: i32, pool: &PgPool) -> Result<()> {
        sqlx::query("UPDATE users SET streak_days = $2 WHERE user_id = $1")
            .bind(user_id)
            .bind(streak_days)
            .execute(pool)
            .await?;
        Ok(())
    }
}
