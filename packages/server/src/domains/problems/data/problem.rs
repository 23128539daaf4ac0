use serde::Deserialize;

use crate::common::utils::truncate_chars;
use crate::common::{Difficulty, Platform, Validator};
use crate::domains::problems::models::{ScrapedProblem, MAX_DESCRIPTION_CHARS};

/// Problem as posted by the extension's content script.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemPayload {
    pub title: Option<String>,
    pub platform: Option<String>,
    pub url: Option<String>,
    pub difficulty: Option<String>,
    pub tags: Option<Vec<String>>,
    pub description: Option<String>,
    pub metadata: Option<ProblemMetadataPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemMetadataPayload {
    pub problem_id: Option<String>,
    pub contest_id: Option<String>,
    pub problem_number: Option<String>,
}

impl ProblemPayload {
    /// Check the payload, recording failures under `problem.*`.
    ///
    /// A missing platform is inferred from the URL; an unrecognised one is
    /// rejected.
    pub fn validate(&self, v: &mut Validator) -> Option<ScrapedProblem> {
        let title = v.require_str("problem.title", self.title.as_deref(), "Problem title is required");
        let url = v.require_str("problem.url", self.url.as_deref(), "Problem URL is required");

        let platform = match self.platform.as_deref() {
            Some(raw) => raw.trim().parse::<Platform>().ok(),
            None => url.and_then(Platform::from_url),
        };
        if platform.is_none() {
            v.error(
                "problem.platform",
                &format!("Invalid platform, expected one of: {}", Platform::allowed_values()),
            );
        }

        let metadata = self.metadata.clone().unwrap_or_default();
        let non_empty = |s: Option<String>| s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        Some(ScrapedProblem {
            title: title?.to_string(),
            platform: platform?,
            url: url?.to_string(),
            difficulty: self
                .difficulty
                .as_deref()
                .map(Difficulty::from_label)
                .unwrap_or_default(),
            tags: self
                .tags
                .iter()
                .flatten()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            description: truncate_chars(
                self.description.as_deref().unwrap_or_default().trim(),
                MAX_DESCRIPTION_CHARS,
            )
            .to_string(),
            external_problem_id: non_empty(metadata.problem_id),
            contest_id: non_empty(metadata.contest_id),
            problem_number: non_empty(metadata.problem_number),
        })
    }
}
