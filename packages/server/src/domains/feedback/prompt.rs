use crate::common::utils::truncate_chars;
use crate::domains::problems::ScrapedProblem;

const DESCRIPTION_CHARS: usize = 500;

/// Prompt asking for debugging tips on the user's code.
pub fn build_debug_prompt(problem: &ScrapedProblem, code: &str, max_tips: usize) -> String {
    let description = match problem.description.trim() {
        "" => "No description available",
        text => truncate_chars(text, DESCRIPTION_CHARS),
    };

    format!(
        r#"You are CodeSensei, an AI mentor who helps debug code without revealing the complete solution.

Given the following problem:
Title: {title}
Platform: {platform}
Difficulty: {difficulty}
Description: {description}

And the user's code:
```
{code}
```

Generate output in JSON format:
{{
  "tips": [
    "<specific debugging tip 1>",
    "<specific debugging tip 2>",
    "<specific debugging tip 3>"
  ],
  "example": "<brief explanation of sample input/output reasoning without revealing solution>",
  "suggestions": [
    "<general improvement suggestion 1>",
    "<general improvement suggestion 2>"
  ]
}}

Rules:
- Never provide the complete solution or working code
- Focus on common mistakes, edge cases, and logical errors
- Provide specific debugging tips that help identify issues
- Example should explain reasoning process, not the solution
- Suggestions should be general improvements, not specific fixes
- Each tip should be actionable and educational
- Limit tips to {max_tips} items maximum"#,
        title = problem.title,
        platform = problem.platform,
        difficulty = problem.difficulty,
    )
}
