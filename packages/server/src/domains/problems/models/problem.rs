use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use llm_client::Provider;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{Difficulty, Platform, ProblemId};

/// Longest description kept for a problem.
pub const MAX_DESCRIPTION_CHARS: usize = 2000;

/// A coding problem scraped from one of the supported platforms, keyed by URL.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Problem {
    pub id: ProblemId,
    pub title: String,
    pub platform: Platform,
    pub url: String,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    pub description: String,

    pub external_problem_id: Option<String>,
    pub contest_id: Option<String>,
    pub problem_number: Option<String>,

    // Cached hints; all present or all NULL
    pub hints_category: Option<String>,
    pub hints_summary: Option<String>,
    pub hints: Option<Vec<String>>,
    pub hints_generated_at: Option<DateTime<Utc>>,
    pub hints_llm_provider: Option<String>,

    pub view_count: i64,
    pub hint_usage_count: i64,
    pub debug_session_count: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Normalised LLM hints as stored on a problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedHints {
    pub category: String,
    pub summary: String,
    pub hints: Vec<String>,
    pub generated_at: DateTime<Utc>,
    pub llm_provider: Option<Provider>,
}

/// Validated problem fields as scraped by the extension.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapedProblem {
    pub title: String,
    pub platform: Platform,
    pub url: String,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    pub description: String,
    pub external_problem_id: Option<String>,
    pub contest_id: Option<String>,
    pub problem_number: Option<String>,
}

impl Problem {
    pub fn cached_hints(&self) -> Option<CachedHints> {
        match (
            &self.hints_category,
            &self.hints_summary,
            &self.hints,
            self.hints_generated_at,
        ) {
            (Some(category), Some(summary), Some(hints), Some(generated_at)) => Some(CachedHints {
                category: category.clone(),
                summary: summary.clone(),
                hints: hints.clone(),
                generated_at,
                llm_provider: self
                    .hints_llm_provider
                    .as_deref()
                    .and_then(|p| p.parse().ok()),
            }),
            _ => None,
        }
    }

    /// Time since the cached hints were generated.
    pub fn cache_age(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.hints_generated_at.map(|generated_at| now - generated_at)
    }

    /// A problem without cached hints counts as stale.
    pub fn is_cache_stale(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        match self.cached_hints() {
            Some(cached) => now - cached.generated_at > ttl,
            None => true,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub async fn find_by_id(id: ProblemId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Problem>("SELECT * FROM problems WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_url(url: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Problem>("SELECT * FROM problems WHERE url = $1")
            .bind(url)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert a scraped problem, or refresh the existing row for its URL.
    ///
    /// Refreshing never blanks data: an `Unknown` difficulty, empty tag list or
    /// empty description keeps whatever was stored before.
    pub async fn upsert_scraped(problem: &ScrapedProblem, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Problem>(
            r#"
            INSERT INTO problems (
                id, title, platform, url, difficulty, tags, description,
                external_problem_id, contest_id, problem_number
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (url) DO UPDATE SET
                title = EXCLUDED.title,
                platform = EXCLUDED.platform,
                difficulty = CASE
                    WHEN EXCLUDED.difficulty = 'Unknown' THEN problems.difficulty
                    ELSE EXCLUDED.difficulty
                END,
                tags = CASE
                    WHEN cardinality(EXCLUDED.tags) = 0 THEN problems.tags
                    ELSE EXCLUDED.tags
                END,
                description = CASE
                    WHEN EXCLUDED.description = '' THEN problems.description
                    ELSE EXCLUDED.description
                END,
                external_problem_id = COALESCE(EXCLUDED.external_problem_id, problems.external_problem_id),
                contest_id = COALESCE(EXCLUDED.contest_id, problems.contest_id),
                problem_number = COALESCE(EXCLUDED.problem_number, problems.problem_number),
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(ProblemId::new())
        .bind(&problem.title)
        .bind(problem.platform)
        .bind(&problem.url)
        .bind(problem.difficulty)
        .bind(&problem.tags)
        .bind(&problem.description)
        .bind(&problem.external_problem_id)
        .bind(&problem.contest_id)
        .bind(&problem.problem_number)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Replace the cached hints.
    pub async fn store_cached_hints(
        id: ProblemId,
        hints: &CachedHints,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Problem>(
            r#"
            UPDATE problems SET
                hints_category = $2,
                hints_summary = $3,
                hints = $4,
                hints_generated_at = $5,
                hints_llm_provider = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&hints.category)
        .bind(&hints.summary)
        .bind(&hints.hints)
        .bind(hints.generated_at)
        .bind(hints.llm_provider.map(|p| p.as_str()))
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn increment_view_count(id: ProblemId, pool: &PgPool) -> Result<()> {
        sqlx::query("UPDATE problems SET view_count = view_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn increment_hint_usage(id: ProblemId, pool: &PgPool) -> Result<()> {
        sqlx::query("UPDATE problems SET hint_usage_count = hint_usage_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn increment_debug_sessions(id: ProblemId, pool: &PgPool) -> Result<()> {
        sqlx::query(
            "UPDATE problems SET debug_session_count = debug_session_count + 1 WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn problem_with_hints(generated_at: Option<DateTime<Utc>>) -> Problem {
        let now = Utc::now();
        Problem {
            id: ProblemId::new(),
            title: "Two Sum".to_string(),
            platform: Platform::Leetcode,
            url: "https://leetcode.com/problems/two-sum/".to_string(),
            difficulty: Difficulty::Easy,
            tags: vec!["Array".to_string(), "Hash Table".to_string()],
            description: "Given an array of integers...".to_string(),
            external_problem_id: Some("1".to_string()),
            contest_id: None,
            problem_number: None,
            hints_category: generated_at.map(|_| "Hash Table".to_string()),
            hints_summary: generated_at.map(|_| "Look up complements.".to_string()),
            hints: generated_at.map(|_| vec!["Think about complements.".to_string()]),
            hints_generated_at: generated_at,
            hints_llm_provider: generated_at.map(|_| "openai".to_string()),
            view_count: 0,
            hint_usage_count: 0,
            debug_session_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_no_cached_hints_is_stale() {
        let problem = problem_with_hints(None);
        assert!(problem.cached_hints().is_none());
        assert!(problem.cache_age(Utc::now()).is_none());
        assert!(problem.is_cache_stale(Utc::now(), Duration::hours(24)));
    }

    #[test]
    fn test_fresh_cache_is_not_stale() {
        let now = Utc::now();
        let problem = problem_with_hints(Some(now - Duration::hours(23)));

        assert_eq!(problem.cache_age(now), Some(Duration::hours(23)));
        assert!(!problem.is_cache_stale(now, Duration::hours(24)));
    }

    #[test]
    fn test_cache_stale_only_after_ttl() {
        let now = Utc::now();
        let ttl = Duration::hours(24);

        let exactly_ttl = problem_with_hints(Some(now - ttl));
        assert!(!exactly_ttl.is_cache_stale(now, ttl));

        let past_ttl = problem_with_hints(Some(now - ttl - Duration::milliseconds(1)));
        assert!(past_ttl.is_cache_stale(now, ttl));
    }

    #[test]
    fn test_partial_cache_is_stale() {
        let now = Utc::now();
        let mut problem = problem_with_hints(Some(now));
        problem.hints = None;

        assert!(problem.cached_hints().is_none());
        assert!(problem.is_cache_stale(now, Duration::hours(24)));
    }

    #[test]
    fn test_cached_hints_parses_provider() {
        let now = Utc::now();
        let cached = problem_with_hints(Some(now)).cached_hints().unwrap();

        assert_eq!(cached.category, "Hash Table");
        assert_eq!(cached.generated_at, now);
        assert_eq!(cached.llm_provider, Some(Provider::OpenAi));
    }
}
