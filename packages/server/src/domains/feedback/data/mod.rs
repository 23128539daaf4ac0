use chrono::{DateTime, Utc};
use llm_client::Provider;
use serde::{Deserialize, Serialize};

use crate::common::{FieldError, ProblemId, Validator};
use crate::domains::feedback::sanitize::MAX_CODE_CHARS;
use crate::domains::hints::data::non_blank;
use crate::domains::problems::{ProblemPayload, ScrapedProblem};

pub const MIN_CODE_CHARS: usize = 10;
pub const MAX_COMMENT_CHARS: usize = 500;

/// Body of `POST /api/feedback`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackPayload {
    pub problem: Option<ProblemPayload>,
    pub code: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackRequest {
    pub problem: ScrapedProblem,
    pub code: String,
    pub user_id: Option<String>,
}

impl FeedbackPayload {
    pub fn validate(self) -> Result<FeedbackRequest, Vec<FieldError>> {
        let mut v = Validator::new();
        let problem = match &self.problem {
            Some(problem) => problem.validate(&mut v),
            None => {
                v.error("problem", "Problem data is required");
                None
            }
        };
        let code = v.str_length(
            "code",
            self.code.as_deref(),
            MIN_CODE_CHARS..=MAX_CODE_CHARS,
            "Code must be between 10 and 10000 characters",
        );
        v.finish()?;

        match (problem, code) {
            (Some(problem), Some(code)) => Ok(FeedbackRequest {
                problem,
                code: code.to_string(),
                user_id: non_blank(self.user_id),
            }),
            _ => Err(Vec::new()),
        }
    }
}

/// Body of `POST /api/feedback/rate`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateFeedbackPayload {
    pub user_id: Option<String>,
    pub problem_id: Option<String>,
    pub rating: Option<i64>,
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RateFeedback {
    pub user_id: String,
    pub problem_id: ProblemId,
    pub rating: i16,
    pub comment: Option<String>,
}

impl RateFeedbackPayload {
    pub fn validate(self) -> Result<RateFeedback, Vec<FieldError>> {
        let mut v = Validator::new();
        let user_id = v.require_str("userId", self.user_id.as_deref(), "User ID is required");
        let problem_id =
            v.parse::<ProblemId>("problemId", self.problem_id.as_deref(), "Valid problem ID is required");
        let rating = v.int_in_range("rating", self.rating, 1..=5, "Rating must be between 1 and 5");
        if let Some(comment) = self.feedback.as_deref() {
            v.str_length(
                "feedback",
                Some(comment),
                0..=MAX_COMMENT_CHARS,
                "Feedback must be less than 500 characters",
            );
        }
        v.finish()?;

        match (user_id, problem_id, rating) {
            (Some(user_id), Some(problem_id), Some(rating)) => Ok(RateFeedback {
                user_id: user_id.to_string(),
                problem_id,
                rating: rating as i16,
                comment: non_blank(self.feedback),
            }),
            _ => Err(Vec::new()),
        }
    }
}

/// Debug feedback as returned to the extension.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub problem_id: ProblemId,
    pub tips: Vec<String>,
    pub example: String,
    pub suggestions: Vec<String>,
    pub generated_at: DateTime<Utc>,
    pub code_length: usize,
    pub llm_provider: Provider,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem() -> ProblemPayload {
        ProblemPayload {
            title: Some("Two Sum".to_string()),
            platform: Some("leetcode".to_string()),
            url: Some("https://leetcode.com/problems/two-sum/".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_code_length_bounds() {
        let short = FeedbackPayload {
            problem: Some(problem()),
            code: Some("x = 1".to_string()),
            user_id: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(short[0].field, "code");

        let long = FeedbackPayload {
            problem: Some(problem()),
            code: Some("x".repeat(MAX_CODE_CHARS + 1)),
            user_id: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(long[0].field, "code");

        let ok = FeedbackPayload {
            problem: Some(problem()),
            code: Some("return nums[0] + nums[1]".to_string()),
            user_id: Some("user-12345".to_string()),
        }
        .validate()
        .unwrap();
        assert_eq!(ok.user_id.as_deref(), Some("user-12345"));
    }

    #[test]
    fn test_problem_and_code_errors_collected() {
        let errors = FeedbackPayload::default().validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["problem", "code"]);
    }

    #[test]
    fn test_rate_requires_rating() {
        let errors = RateFeedbackPayload {
            user_id: Some("user-12345".to_string()),
            problem_id: Some(ProblemId::new().to_string()),
            rating: None,
            feedback: None,
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors[0].field, "rating");
    }

    #[test]
    fn test_rate_comment_limit() {
        let base = RateFeedbackPayload {
            user_id: Some("user-12345".to_string()),
            problem_id: Some(ProblemId::new().to_string()),
            rating: Some(4),
            feedback: Some("y".repeat(MAX_COMMENT_CHARS + 1)),
        };
        let errors = base.clone().validate().unwrap_err();
        assert_eq!(errors[0].field, "feedback");

        let rate = RateFeedbackPayload {
            feedback: Some("Really helpful".to_string()),
            ..base
        }
        .validate()
        .unwrap();
        assert_eq!(rate.rating, 4);
        assert_eq!(rate.comment.as_deref(), Some("Really helpful"));
    }
}
