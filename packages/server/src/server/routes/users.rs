use axum::extract::Extension;
use serde::Serialize;

use crate::common::FieldError;
use crate::domains::progress::data::MIN_USER_ID_CHARS;
use crate::domains::users::models::UserPreferences;
use crate::domains::users::{PreferencesPayload, User};
use crate::server::app::AxumAppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::extract::{ApiJson, ApiPath, Success};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesResponse {
    user_id: String,
    preferences: UserPreferences,
}

fn check_user_id(user_id: &str) -> ApiResult<()> {
    if user_id.trim().chars().count() < MIN_USER_ID_CHARS {
        return Err(ApiError::Validation(vec![FieldError::new(
            "userId",
            "User ID must be a valid string",
        )]));
    }
    Ok(())
}

/// GET /api/users/:userId/preferences
pub async fn get_preferences_handler(
    Extension(state): Extension<AxumAppState>,
    ApiPath(user_id): ApiPath<String>,
) -> ApiResult<Success<PreferencesResponse>> {
    check_user_id(&user_id)?;
    let user = User::find_or_create(&user_id, &state.deps.db_pool).await?;

    Ok(Success::new(PreferencesResponse {
        preferences: user.preferences(),
        user_id: user.user_id,
    }))
}

/// PUT /api/users/:userId/preferences
pub async fn update_preferences_handler(
    Extension(state): Extension<AxumAppState>,
    ApiPath(user_id): ApiPath<String>,
    ApiJson(payload): ApiJson<PreferencesPayload>,
) -> ApiResult<Success<PreferencesResponse>> {
    check_user_id(&user_id)?;
    let update = payload.validate()?;

    let pool = &state.deps.db_pool;
    User::find_or_create(&user_id, pool).await?;
    let user = User::update_preferences(&user_id, &update, pool).await?;

    Ok(Success::new(PreferencesResponse {
        preferences: user.preferences(),
        user_id: user.user_id,
    }))
}
