//! Test fixtures for creating test data.

use serde_json::{json, Value};
use server_core::common::{Difficulty, Platform};
use server_core::domains::problems::ScrapedProblem;
use uuid::Uuid;

/// A LeetCode problem with a URL no other test uses.
pub fn unique_problem(title: &str) -> ScrapedProblem {
    unique_problem_on(Platform::Leetcode, title)
}

/// A problem on `platform` with a URL no other test uses.
pub fn unique_problem_on(platform: Platform, title: &str) -> ScrapedProblem {
    let slug = Uuid::new_v4().simple().to_string();
    let url = match platform {
        Platform::Leetcode => format!("https://leetcode.com/problems/{}/", slug),
        Platform::Hackerrank => format!("https://www.hackerrank.com/challenges/{}/problem", slug),
        Platform::Codeforces => format!("https://codeforces.com/problemset/problem/{}/A", slug),
        Platform::Atcoder => format!("https://atcoder.jp/contests/{}/tasks/{}_a", slug, slug),
    };
    ScrapedProblem {
        title: title.to_string(),
        platform,
        url,
        difficulty: Difficulty::Easy,
        tags: vec!["Array".to_string(), "Hash Table".to_string()],
        description: "Given an array of integers, return indices of two numbers.".to_string(),
        external_problem_id: Some("1".to_string()),
        contest_id: None,
        problem_number: None,
    }
}

pub fn unique_user_id() -> String {
    format!("user-{}", Uuid::new_v4().simple())
}

/// Request body form of a scraped problem.
pub fn problem_json(problem: &ScrapedProblem) -> Value {
    json!({
        "title": problem.title,
        "platform": problem.platform.as_str(),
        "url": problem.url,
        "difficulty": problem.difficulty.as_str(),
        "tags": problem.tags,
        "description": problem.description,
    })
}

pub fn hints_reply(category: &str) -> Value {
    json!({
        "category": category,
        "summary": "Store complements while scanning.",
        "hints": [
            "What do you need to find for each element?",
            "Can a lookup structure make that fast?",
            "Check the map before inserting the current value.",
        ],
    })
}

pub fn debug_reply() -> Value {
    json!({
        "tips": ["Your loop skips the last element", "Check the empty input"],
        "example": "For [2, 7], target 9, the pair is found on the second step.",
        "suggestions": ["Write a test for duplicates"],
    })
}
