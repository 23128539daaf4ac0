use crate::common::utils::truncate_chars;
use crate::domains::problems::ScrapedProblem;

const DESCRIPTION_CHARS: usize = 1000;

/// Prompt asking for a category, a summary and three progressive hints.
pub fn build_hints_prompt(problem: &ScrapedProblem) -> String {
    let description = match problem.description.trim() {
        "" => "No description available",
        text => truncate_chars(text, DESCRIPTION_CHARS),
    };
    let tags = if problem.tags.is_empty() {
        "None".to_string()
    } else {
        problem.tags.join(", ")
    };

    format!(
        r#"You are CodeSensei, an AI mentor who guides users through coding problems step by step without revealing direct answers.

Given the following problem:
Title: {title}
Platform: {platform}
Difficulty: {difficulty}
Description: {description}
Tags: {tags}

Generate output in JSON format:
{{
  "category": "<algorithm/data structure category>",
  "summary": "<brief 2-3 sentence summary of the problem approach>",
  "hints": [
    "<conceptual hint 1 - focus on problem understanding>",
    "<conceptual hint 2 - focus on approach/strategy>",
    "<conceptual hint 3 - focus on implementation details>"
  ]
}}

Rules:
- Never provide the full code or solution
- Keep hints conceptual and progressive (each builds on the previous)
- Focus on understanding the problem and approach, not implementation
- Make hints educational and thought-provoking
- Category should be specific (e.g., "Dynamic Programming", "Two Pointers", "Binary Search")
- Summary should explain the core approach without giving away the solution
- Each hint should be 1-2 sentences maximum"#,
        title = problem.title,
        platform = problem.platform,
        difficulty = problem.difficulty,
    )
}
