pub mod problem;
pub mod stats;

pub use problem::{CachedHints, Problem, ScrapedProblem, MAX_DESCRIPTION_CHARS};
pub use stats::{DebugUsageStats, HintUsageStats, PlatformDebugUsage, PlatformHintUsage};
