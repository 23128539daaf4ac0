use axum::extract::Extension;
use serde::Serialize;

use crate::domains::feedback::activities::{generate_feedback, rate_feedback};
use crate::domains::feedback::{FeedbackPayload, FeedbackResponse, RateFeedbackPayload};
use crate::domains::problems::models::{DebugUsageStats, PlatformDebugUsage};
use crate::server::app::AxumAppState;
use crate::server::error::ApiResult;
use crate::server::extract::{Acknowledged, ApiJson, Success};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackStatsResponse {
    overall: DebugUsageStats,
    by_platform: Vec<PlatformDebugUsage>,
}

/// POST /api/feedback
pub async fn generate_feedback_handler(
    Extension(state): Extension<AxumAppState>,
    ApiJson(payload): ApiJson<FeedbackPayload>,
) -> ApiResult<Success<FeedbackResponse>> {
    let request = payload.validate()?;
    let feedback = generate_feedback(request, &state.deps).await?;
    Ok(Success::new(feedback))
}

/// GET /api/feedback/stats
pub async fn feedback_stats_handler(
    Extension(state): Extension<AxumAppState>,
) -> ApiResult<Success<FeedbackStatsResponse>> {
    let pool = &state.deps.db_pool;
    Ok(Success::new(FeedbackStatsResponse {
        overall: DebugUsageStats::overall(pool).await?,
        by_platform: DebugUsageStats::by_platform(pool).await?,
    }))
}

/// POST /api/feedback/rate
pub async fn rate_feedback_handler(
    Extension(state): Extension<AxumAppState>,
    ApiJson(payload): ApiJson<RateFeedbackPayload>,
) -> ApiResult<Acknowledged> {
    let request = payload.validate()?;
    rate_feedback(request, &state.deps).await?;
    Ok(Acknowledged::new("Rating saved successfully"))
}
