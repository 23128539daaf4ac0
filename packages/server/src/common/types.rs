//! Enumerations shared by the problem, progress and user domains.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coding platforms the extension scrapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "platform", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Leetcode,
    Hackerrank,
    Codeforces,
    Atcoder,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Leetcode,
        Platform::Hackerrank,
        Platform::Codeforces,
        Platform::Atcoder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Leetcode => "leetcode",
            Platform::Hackerrank => "hackerrank",
            Platform::Codeforces => "codeforces",
            Platform::Atcoder => "atcoder",
        }
    }

    /// URL fragments that identify a problem page on each platform.
    fn problem_paths(&self) -> &'static [&'static str] {
        match self {
            Platform::Leetcode => &["leetcode.com/problems", "leetcode.cn/problems"],
            Platform::Hackerrank => &["hackerrank.com/challenges"],
            Platform::Codeforces => &[
                "codeforces.com/problemset",
                "codeforces.com/contest",
                "codeforces.com/gym",
            ],
            Platform::Atcoder => &["atcoder.jp/contests"],
        }
    }

    /// Detect the platform from a problem page URL.
    pub fn from_url(url: &str) -> Option<Self> {
        let url = url.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.problem_paths().iter().any(|path| url.contains(path)))
    }

    /// Comma separated list used in validation messages.
    pub fn allowed_values() -> String {
        Self::ALL
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "leetcode" => Ok(Platform::Leetcode),
            "hackerrank" => Ok(Platform::Hackerrank),
            "codeforces" => Ok(Platform::Codeforces),
            "atcoder" => Ok(Platform::Atcoder),
            _ => Err(anyhow::anyhow!("Invalid platform: {}", s)),
        }
    }
}

/// Problem difficulty as labelled by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "difficulty")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    #[default]
    Unknown,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Unknown => "Unknown",
        }
    }

    /// Lenient parse of scraped labels; anything unrecognised is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Unknown,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a learner is with a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "completion_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    #[default]
    InProgress,
    Completed,
    Abandoned,
}

/// Popup colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "theme", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(anyhow::anyhow!("Invalid theme: {}", s)),
        }
    }
}
