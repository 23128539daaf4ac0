//! Recording learner events against progress records.

use anyhow::Result;
use tracing::{debug, info};

use crate::common::DomainError;
use crate::domains::problems::Problem;
use crate::domains::progress::data::{CompleteProblem, RevealHint};
use crate::domains::progress::models::Progress;
use crate::domains::users::User;
use crate::kernel::ServerDeps;

/// Start (or restart) a session on `problem` for `user_id`.
///
/// The user is created on demand; their first view of a problem counts
/// towards `total_problems_viewed`.
pub async fn record_problem_view(
    user_id: &str,
    problem: &Problem,
    deps: &ServerDeps,
) -> Result<Progress> {
    let pool = &deps.db_pool;

    User::find_or_create(user_id, pool).await?;
    let (progress, created) =
        Progress::record_view(user_id, problem.id, problem.platform, &problem.title, pool).await?;

    if created {
        User::increment_problems_viewed(user_id, pool).await?;
    } else {
        User::touch(user_id, pool).await?;
    }

    debug!(user_id, problem_id = %problem.id, created, "Recorded problem view");
    Ok(progress)
}

/// Log a debug feedback request for `user_id` on `problem`.
///
/// An open session keeps its start time; a debug request is not a new view.
pub async fn record_debug_session(
    user_id: &str,
    problem: &Problem,
    code_length: usize,
    deps: &ServerDeps,
) -> Result<Progress> {
    let pool = &deps.db_pool;

    User::find_or_create(user_id, pool).await?;
    let (progress, created) =
        Progress::find_or_create(user_id, problem.id, problem.platform, &problem.title, pool)
            .await?;
    if created {
        User::increment_problems_viewed(user_id, pool).await?;
    }

    let code_length = i32::try_from(code_length).unwrap_or(i32::MAX);
    Progress::add_debug_session(progress.id, code_length, true, pool).await?;
    User::increment_debug_sessions(user_id, pool).await?;

    debug!(user_id, problem_id = %problem.id, code_length, "Recorded debug session");
    Ok(progress)
}

/// Record that the user revealed a hint. The problem must have been viewed.
pub async fn reveal_hint(request: RevealHint, deps: &ServerDeps) -> Result<()> {
    let pool = &deps.db_pool;

    let progress = Progress::find(&request.user_id, request.problem_id, pool)
        .await?
        .ok_or_else(|| {
            DomainError::NotFound("Please view the problem first before using hints".to_string())
        })?;

    Progress::add_revealed_hint(progress.id, request.hint_index, pool).await?;
    Problem::increment_hint_usage(request.problem_id, pool).await?;
    User::increment_hints_used(&request.user_id, pool).await?;

    info!(
        user_id = %request.user_id,
        problem_id = %request.problem_id,
        hint_index = request.hint_index,
        "Hint revealed"
    );
    Ok(())
}

pub async fn complete_problem(request: CompleteProblem, deps: &ServerDeps) -> Result<Progress> {
    let pool = &deps.db_pool;

    let progress = Progress::find(&request.user_id, request.problem_id, pool)
        .await?
        .ok_or_else(|| {
            DomainError::NotFound("No progress found for this user and problem".to_string())
        })?;

    let progress = Progress::complete(progress.id, request.rating, pool).await?;
    User::touch(&request.user_id, pool).await?;

    info!(
        user_id = %request.user_id,
        problem_id = %request.problem_id,
        time_spent_ms = progress.time_spent_ms,
        "Problem completed"
    );
    Ok(progress)
}
