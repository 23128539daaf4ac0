//! Hint generation with a per-problem cache.

use anyhow::Result;
use chrono::Utc;
use llm_client::Provider;
use tracing::{info, warn};

use crate::common::DomainError;
use crate::domains::hints::data::{HintsRequest, HintsResponse};
use crate::domains::hints::parse::parse_hints_response;
use crate::domains::hints::prompt::build_hints_prompt;
use crate::domains::problems::{CachedHints, Problem};
use crate::domains::progress::activities::record_problem_view;
use crate::domains::users::User;
use crate::kernel::ServerDeps;

/// Return hints for the problem, from cache when fresh, otherwise from the LLM.
///
/// Fails with [`DomainError::LlmNotConfigured`] before touching anything if
/// no provider has credentials.
pub async fn generate_hints(request: HintsRequest, deps: &ServerDeps) -> Result<HintsResponse> {
    if !deps.llm.is_configured() {
        return Err(DomainError::LlmNotConfigured.into());
    }

    let pool = &deps.db_pool;
    let now = Utc::now();

    if let Some(existing) = Problem::find_by_url(&request.problem.url, pool).await? {
        if !existing.is_cache_stale(now, deps.settings.hint_cache_ttl) {
            if let Some(cached) = existing.cached_hints() {
                info!(problem_id = %existing.id, url = %existing.url, "Serving cached hints");
                Problem::increment_view_count(existing.id, pool).await?;
                log_view(request.user_id.as_deref(), &existing, deps).await;
                return Ok(response(&existing, cached, true));
            }
        }
    }

    let preferred = preferred_provider(request.user_id.as_deref(), deps).await;
    let provider = deps
        .llm
        .resolve_provider(preferred)
        .ok_or(DomainError::LlmNotConfigured)?;

    let raw = deps
        .llm
        .complete(provider, &build_hints_prompt(&request.problem))
        .await?;
    let parsed = parse_hints_response(&raw, deps.settings.max_hints);

    let cached = CachedHints {
        category: parsed.category,
        summary: parsed.summary,
        hints: parsed.hints,
        generated_at: Utc::now(),
        llm_provider: Some(provider),
    };

    let problem = Problem::upsert_scraped(&request.problem, pool).await?;
    let problem = Problem::store_cached_hints(problem.id, &cached, pool).await?;
    Problem::increment_view_count(problem.id, pool).await?;
    log_view(request.user_id.as_deref(), &problem, deps).await;

    info!(
        problem_id = %problem.id,
        provider = %provider,
        fallback = parsed.used_fallback,
        "Generated hints"
    );
    // Answer with the stored copy so the timestamp matches later cache hits.
    let stored = problem.cached_hints().unwrap_or(cached);
    Ok(response(&problem, stored, false))
}

fn response(problem: &Problem, cached: CachedHints, from_cache: bool) -> HintsResponse {
    HintsResponse {
        problem_id: problem.id,
        category: cached.category,
        summary: cached.summary,
        hints: cached.hints,
        cached: from_cache,
        generated_at: cached.generated_at,
        llm_provider: cached.llm_provider,
    }
}

/// The user's stored provider choice, if they have one.
pub(crate) async fn preferred_provider(user_id: Option<&str>, deps: &ServerDeps) -> Option<Provider> {
    let user_id = user_id?;
    match User::find(user_id, &deps.db_pool).await {
        Ok(user) => user.and_then(|u| u.preferred_provider()),
        Err(e) => {
            warn!(user_id, error = %e, "Failed to load user preferences");
            None
        }
    }
}

/// Analytics are best effort; failures are logged, not returned.
async fn log_view(user_id: Option<&str>, problem: &Problem, deps: &ServerDeps) {
    let Some(user_id) = user_id else { return };
    if let Err(e) = record_problem_view(user_id, problem, deps).await {
        warn!(user_id, problem_id = %problem.id, error = %e, "Failed to log problem view");
    }
}
