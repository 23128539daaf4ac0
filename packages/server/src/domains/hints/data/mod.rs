use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use llm_client::Provider;

use crate::common::{FieldError, ProblemId, Validator};
use crate::domains::problems::{ProblemPayload, ScrapedProblem};

/// Body of `POST /api/hints`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HintsPayload {
    pub problem: Option<ProblemPayload>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HintsRequest {
    pub problem: ScrapedProblem,
    pub user_id: Option<String>,
}

impl HintsPayload {
    pub fn validate(self) -> Result<HintsRequest, Vec<FieldError>> {
        let mut v = Validator::new();
        let problem = match &self.problem {
            Some(problem) => problem.validate(&mut v),
            None => {
                v.error("problem", "Problem data is required");
                None
            }
        };
        v.finish()?;

        problem
            .map(|problem| HintsRequest {
                problem,
                user_id: non_blank(self.user_id),
            })
            .ok_or_else(Vec::new)
    }
}

/// Hints as returned to the extension.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HintsResponse {
    pub problem_id: ProblemId,
    pub category: String,
    pub summary: String,
    pub hints: Vec<String>,
    pub cached: bool,
    pub generated_at: DateTime<Utc>,
    pub llm_provider: Option<Provider>,
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
