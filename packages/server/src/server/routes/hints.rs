use axum::extract::Extension;
use serde::Serialize;

use crate::domains::hints::activities::generate_hints;
use crate::domains::hints::{HintsPayload, HintsResponse};
use crate::domains::problems::models::{HintUsageStats, PlatformHintUsage};
use crate::server::app::AxumAppState;
use crate::server::error::ApiResult;
use crate::server::extract::{ApiJson, Success};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HintStatsResponse {
    overall: HintUsageStats,
    by_platform: Vec<PlatformHintUsage>,
}

/// POST /api/hints
pub async fn generate_hints_handler(
    Extension(state): Extension<AxumAppState>,
    ApiJson(payload): ApiJson<HintsPayload>,
) -> ApiResult<Success<HintsResponse>> {
    let request = payload.validate()?;
    let hints = generate_hints(request, &state.deps).await?;
    Ok(Success::new(hints))
}

/// GET /api/hints/stats
pub async fn hint_stats_handler(
    Extension(state): Extension<AxumAppState>,
) -> ApiResult<Success<HintStatsResponse>> {
    let pool = &state.deps.db_pool;
    Ok(Success::new(HintStatsResponse {
        overall: HintUsageStats::overall(pool).await?,
        by_platform: HintUsageStats::by_platform(pool).await?,
    }))
}
