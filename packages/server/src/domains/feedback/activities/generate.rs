use anyhow::Result;
use chrono::Utc;
use tracing::{info, warn};

use crate::common::DomainError;
use crate::domains::feedback::data::{FeedbackRequest, FeedbackResponse};
use crate::domains::feedback::parse::parse_debug_response;
use crate::domains::feedback::prompt::build_debug_prompt;
use crate::domains::feedback::sanitize::sanitize_code;
use crate::domains::hints::activities::generate::preferred_provider;
use crate::domains::problems::Problem;
use crate::domains::progress::activities::record_debug_session;
use crate::kernel::ServerDeps;

/// Ask the LLM for debugging tips on the user's code.
///
/// Feedback is not cached; every call reaches the model.
pub async fn generate_feedback(
    request: FeedbackRequest,
    deps: &ServerDeps,
) -> Result<FeedbackResponse> {
    if !deps.llm.is_configured() {
        return Err(DomainError::LlmNotConfigured.into());
    }

    let code = sanitize_code(&request.code);
    let code_length = code.chars().count();

    let preferred = preferred_provider(request.user_id.as_deref(), deps).await;
    let provider = deps
        .llm
        .resolve_provider(preferred)
        .ok_or(DomainError::LlmNotConfigured)?;

    let prompt = build_debug_prompt(&request.problem, &code, deps.settings.max_debug_tips);
    let raw = deps.llm.complete(provider, &prompt).await?;
    let parsed = parse_debug_response(&raw, deps.settings.max_debug_tips);
    let generated_at = Utc::now();

    let pool = &deps.db_pool;
    let problem = Problem::upsert_scraped(&request.problem, pool).await?;
    Problem::increment_debug_sessions(problem.id, pool).await?;

    if let Some(user_id) = request.user_id.as_deref() {
        if let Err(e) = record_debug_session(user_id, &problem, code_length, deps).await {
            warn!(user_id, problem_id = %problem.id, error = %e, "Failed to log debug session");
        }
    }

    info!(
        problem_id = %problem.id,
        provider = %provider,
        code_length,
        fallback = parsed.used_fallback,
        "Generated debug feedback"
    );

    Ok(FeedbackResponse {
        problem_id: problem.id,
        tips: parsed.tips,
        example: parsed.example,
        suggestions: parsed.suggestions,
        generated_at,
        code_length,
        llm_provider: provider,
    })
}
