//! Debug feedback and ratings against a real database.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use server_core::common::Platform;
use server_core::domains::feedback::activities::{generate_feedback, rate_feedback};
use server_core::domains::feedback::data::RateFeedback;
use server_core::domains::feedback::FeedbackRequest;
use server_core::domains::problems::Problem;
use server_core::domains::progress::activities::record_problem_view;
use server_core::domains::progress::Progress;
use server_core::domains::users::User;
use server_core::kernel::MockLlm;
use test_context::test_context;
use tower::ServiceExt;

use crate::common::{
    body_json, debug_reply, get_request, json_request, unique_problem, unique_problem_on,
    unique_user_id, TestHarness,
};

#[test_context(TestHarness)]
#[tokio::test]
#[ignore] // Requires Docker
async fn feedback_logs_debug_session(ctx: &TestHarness) {
    let (deps, llm) = ctx.deps(MockLlm::new().with_json_response(&debug_reply()));
    let user_id = unique_user_id();
    let problem = unique_problem("Two Sum");

    let feedback = generate_feedback(
        FeedbackRequest {
            problem: problem.clone(),
            code: "<b>for</b> i in range(len(nums)): pass".to_string(),
            user_id: Some(user_id.clone()),
        },
        &deps,
    )
    .await
    .unwrap();

    assert_eq!(feedback.tips.len(), 2);
    assert_eq!(feedback.code_length, "for i in range(len(nums)): pass".len());
    assert!(llm.last_prompt().unwrap().contains("for i in range(len(nums)): pass"));
    assert!(!llm.last_prompt().unwrap().contains("<b>"));

    let stored = Problem::find_by_id(feedback.problem_id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.debug_session_count, 1);
    // Feedback never fills the hint cache
    assert!(stored.cached_hints().is_none());

    let progress = Progress::find(&user_id, stored.id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(progress.debug_sessions, 1);
    let sessions = Progress::debug_session_log(progress.id, &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(sessions.len(), 1);
    assert!(sessions[0].feedback_received);

    let user = User::find(&user_id, &ctx.db_pool).await.unwrap().unwrap();
    assert_eq!(user.total_debug_sessions, 1);
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore] // Requires Docker
async fn feedback_keeps_the_open_session(ctx: &TestHarness) {
    let (deps, _llm) = ctx.deps(MockLlm::new().with_json_response(&debug_reply()));
    let user_id = unique_user_id();
    let scraped = unique_problem("Best Time to Buy and Sell Stock");
    let problem = Problem::upsert_scraped(&scraped, &ctx.db_pool).await.unwrap();

    let viewed = record_problem_view(&user_id, &problem, &deps).await.unwrap();

    generate_feedback(
        FeedbackRequest {
            problem: scraped,
            code: "min_price = prices[0]\nfor p in prices: pass".to_string(),
            user_id: Some(user_id.clone()),
        },
        &deps,
    )
    .await
    .unwrap();

    let progress = Progress::find(&user_id, problem.id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(progress.id, viewed.id);
    assert_eq!(progress.session_start, viewed.session_start);
    assert_eq!(progress.debug_sessions, 1);

    let user = User::find(&user_id, &ctx.db_pool).await.unwrap().unwrap();
    assert_eq!(user.total_problems_viewed, 1);
    assert_eq!(user.total_debug_sessions, 1);
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore] // Requires Docker
async fn rating_requires_existing_progress(ctx: &TestHarness) {
    let (deps, _llm) = ctx.deps(MockLlm::new().with_json_response(&debug_reply()));
    let user_id = unique_user_id();

    let feedback = generate_feedback(
        FeedbackRequest {
            problem: unique_problem("Jump Game"),
            code: "return nums[0] >= len(nums)".to_string(),
            user_id: Some(user_id.clone()),
        },
        &deps,
    )
    .await
    .unwrap();

    let missing = rate_feedback(
        RateFeedback {
            user_id: unique_user_id(),
            problem_id: feedback.problem_id,
            rating: 4,
            comment: None,
        },
        &deps,
    )
    .await;
    assert!(missing.is_err());

    let progress = rate_feedback(
        RateFeedback {
            user_id,
            problem_id: feedback.problem_id,
            rating: 5,
            comment: Some("Spot on".to_string()),
        },
        &deps,
    )
    .await
    .unwrap();
    assert_eq!(progress.helpfulness_rating, Some(5));
    assert_eq!(progress.feedback_comment.as_deref(), Some("Spot on"));
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore] // Requires Docker
async fn rate_route_returns_404_without_progress(ctx: &TestHarness) {
    let (router, _llm) = ctx.router(MockLlm::new());

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/feedback/rate",
            &json!({
                "userId": unique_user_id(),
                "problemId": uuid::Uuid::now_v7().to_string(),
                "rating": 3
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Not Found");
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore] // Requires Docker
async fn feedback_stats_aggregate_by_platform(ctx: &TestHarness) {
    let db = ctx.isolated().await.unwrap();
    let (router, _llm) = db.router(MockLlm::new());

    let response = router
        .clone()
        .oneshot(get_request("/api/feedback/stats"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["overall"]["totalProblems"], 0);
    assert_eq!(body["data"]["overall"]["totalDebugSessions"], 0);
    assert_eq!(body["data"]["overall"]["averageDebugSessionsPerProblem"], 0.0);
    assert_eq!(body["data"]["byPlatform"], json!([]));

    let seeds = [
        (Platform::Atcoder, "A - Welcome", 0),
        (Platform::Leetcode, "Two Sum", 3),
        (Platform::Leetcode, "Reverse Linked List", 1),
    ];
    for (platform, title, sessions) in seeds {
        let problem = Problem::upsert_scraped(&unique_problem_on(platform, title), &db.db_pool)
            .await
            .unwrap();
        for _ in 0..sessions {
            Problem::increment_debug_sessions(problem.id, &db.db_pool)
                .await
                .unwrap();
        }
    }

    let response = router
        .oneshot(get_request("/api/feedback/stats"))
        .await
        .unwrap();
    let body = body_json(response).await;
    let overall = &body["data"]["overall"];
    assert_eq!(overall["totalProblems"], 3);
    assert_eq!(overall["totalDebugSessions"], 4);
    let average = overall["averageDebugSessionsPerProblem"].as_f64().unwrap();
    assert!((average - 4.0 / 3.0).abs() < 1e-9);

    let by_platform = body["data"]["byPlatform"].as_array().unwrap();
    assert_eq!(by_platform.len(), 2);
    assert_eq!(by_platform[0]["platform"], "leetcode");
    assert_eq!(by_platform[0]["problemCount"], 2);
    assert_eq!(by_platform[0]["totalDebugSessions"], 4);
    assert_eq!(by_platform[1]["platform"], "atcoder");
    assert_eq!(by_platform[1]["problemCount"], 1);
    assert_eq!(by_platform[1]["totalDebugSessions"], 0);
}
