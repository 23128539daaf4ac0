use anyhow::Result;
use tracing::info;

use crate::common::DomainError;
use crate::domains::feedback::data::RateFeedback;
use crate::domains::progress::Progress;
use crate::kernel::ServerDeps;

/// Store how helpful the user found the feedback for a problem.
pub async fn rate_feedback(request: RateFeedback, deps: &ServerDeps) -> Result<Progress> {
    let pool = &deps.db_pool;

    let progress = Progress::find(&request.user_id, request.problem_id, pool)
        .await?
        .ok_or_else(|| {
            DomainError::NotFound("No debug session found for this user and problem".to_string())
        })?;

    let progress =
        Progress::rate_helpfulness(progress.id, request.rating, request.comment.as_deref(), pool)
            .await?;

    info!(
        user_id = %request.user_id,
        problem_id = %request.problem_id,
        rating = request.rating,
        "Feedback rated"
    );
    Ok(progress)
}
