use axum::extract::Extension;

use crate::common::Platform;
use crate::domains::progress::activities::{
    complete_problem, leaderboard, platform_stats, reveal_hint, user_dashboard, Dashboard,
    Leaderboard,
};
use crate::domains::progress::data::{
    CompletePayload, DashboardQuery, LeaderboardQuery, RevealHintPayload,
};
use crate::domains::progress::models::PlatformStats;
use crate::server::app::AxumAppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::extract::{Acknowledged, ApiJson, ApiPath, ApiQuery, Success};

/// GET /api/progress/:userId
pub async fn user_progress_handler(
    Extension(state): Extension<AxumAppState>,
    ApiPath(user_id): ApiPath<String>,
    ApiQuery(query): ApiQuery<DashboardQuery>,
) -> ApiResult<Success<Dashboard>> {
    let days = query.validate(&user_id)?;
    let dashboard = user_dashboard(&user_id, days, &state.deps).await?;
    Ok(Success::new(dashboard))
}

/// POST /api/progress/hint
pub async fn reveal_hint_handler(
    Extension(state): Extension<AxumAppState>,
    ApiJson(payload): ApiJson<RevealHintPayload>,
) -> ApiResult<Acknowledged> {
    let request = payload.validate()?;
    reveal_hint(request, &state.deps).await?;
    Ok(Acknowledged::new("Hint usage logged successfully"))
}

/// POST /api/progress/complete
pub async fn complete_problem_handler(
    Extension(state): Extension<AxumAppState>,
    ApiJson(payload): ApiJson<CompletePayload>,
) -> ApiResult<Acknowledged> {
    let request = payload.validate()?;
    complete_problem(request, &state.deps).await?;
    Ok(Acknowledged::new("Problem marked as completed"))
}

/// GET /api/progress/leaderboard/:platform
pub async fn leaderboard_handler(
    Extension(state): Extension<AxumAppState>,
    ApiPath(platform): ApiPath<String>,
    ApiQuery(query): ApiQuery<LeaderboardQuery>,
) -> ApiResult<Success<Leaderboard>> {
    let platform: Platform = platform.parse().map_err(|_| {
        ApiError::BadRequest(format!(
            "Platform must be one of: {}",
            Platform::allowed_values()
        ))
    })?;
    let limit = query.validate()?;

    let board = leaderboard(platform, limit, &state.deps).await?;
    Ok(Success::new(board))
}

/// GET /api/progress/platforms
pub async fn platform_stats_handler(
    Extension(state): Extension<AxumAppState>,
) -> ApiResult<Success<Vec<PlatformStats>>> {
    let stats = platform_stats(&state.deps).await?;
    Ok(Success::new(stats))
}
