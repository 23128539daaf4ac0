//! Request payloads for the progress routes.

use serde::Deserialize;

use crate::common::{FieldError, ProblemId, Validator};
use crate::domains::progress::models::{DEFAULT_LEADERBOARD_LIMIT, MAX_LEADERBOARD_LIMIT};

pub const DEFAULT_ACTIVITY_DAYS: i64 = 30;
pub const MIN_USER_ID_CHARS: usize = 5;

/// Body of `POST /api/progress/hint`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealHintPayload {
    pub user_id: Option<String>,
    pub problem_id: Option<String>,
    pub hint_index: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevealHint {
    pub user_id: String,
    pub problem_id: ProblemId,
    pub hint_index: i32,
}

impl RevealHintPayload {
    pub fn validate(self) -> Result<RevealHint, Vec<FieldError>> {
        let mut v = Validator::new();
        let user_id = v.require_str("userId", self.user_id.as_deref(), "User ID is required");
        let problem_id =
            v.parse::<ProblemId>("problemId", self.problem_id.as_deref(), "Valid problem ID is required");
        let hint_index = v.int_in_range(
            "hintIndex",
            self.hint_index,
            0..=10,
            "Hint index must be between 0 and 10",
        );
        v.finish()?;

        match (user_id, problem_id, hint_index) {
            (Some(user_id), Some(problem_id), Some(hint_index)) => Ok(RevealHint {
                user_id: user_id.to_string(),
                problem_id,
                hint_index: hint_index as i32,
            }),
            _ => Err(Vec::new()),
        }
    }
}

/// Body of `POST /api/progress/complete`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletePayload {
    pub user_id: Option<String>,
    pub problem_id: Option<String>,
    pub rating: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompleteProblem {
    pub user_id: String,
    pub problem_id: ProblemId,
    pub rating: Option<i16>,
}

impl CompletePayload {
    pub fn validate(self) -> Result<CompleteProblem, Vec<FieldError>> {
        let mut v = Validator::new();
        let user_id = v.require_str("userId", self.user_id.as_deref(), "User ID is required");
        let problem_id =
            v.parse::<ProblemId>("problemId", self.problem_id.as_deref(), "Valid problem ID is required");
        let rating =
            v.optional_int_in_range("rating", self.rating, 1..=5, "Rating must be between 1 and 5");
        v.finish()?;

        match (user_id, problem_id) {
            (Some(user_id), Some(problem_id)) => Ok(CompleteProblem {
                user_id: user_id.to_string(),
                problem_id,
                rating: rating.map(|r| r as i16),
            }),
            _ => Err(Vec::new()),
        }
    }
}

/// Query of `GET /api/progress/:userId`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardQuery {
    pub days: Option<String>,
}

impl DashboardQuery {
    pub fn validate(&self, user_id: &str) -> Result<i64, Vec<FieldError>> {
        let mut v = Validator::new();
        v.str_length(
            "userId",
            Some(user_id),
            MIN_USER_ID_CHARS..=usize::MAX,
            "User ID must be a valid string",
        );
        let days = optional_int_param(
            &mut v,
            "days",
            self.days.as_deref(),
            1..=365,
            "Days must be between 1 and 365",
        );
        v.finish()?;
        Ok(days.unwrap_or(DEFAULT_ACTIVITY_DAYS))
    }
}

/// Query of `GET /api/progress/leaderboard/:platform`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<String>,
}

impl LeaderboardQuery {
    pub fn validate(&self) -> Result<usize, Vec<FieldError>> {
        let mut v = Validator::new();
        let limit = optional_int_param(
            &mut v,
            "limit",
            self.limit.as_deref(),
            1..=MAX_LEADERBOARD_LIMIT as i64,
            "Limit must be between 1 and 100",
        );
        v.finish()?;
        Ok(limit.map_or(DEFAULT_LEADERBOARD_LIMIT, |l| l as usize))
    }
}

/// Query-string integer: absent is fine, anything present must parse and
/// fall inside `range`.
fn optional_int_param(
    v: &mut Validator,
    field: &str,
    raw: Option<&str>,
    range: std::ops::RangeInclusive<i64>,
    message: &str,
) -> Option<i64> {
    let raw = raw?;
    let parsed = v.parse::<i64>(field, Some(raw), message)?;
    v.int_in_range(field, Some(parsed), range, message)
}
