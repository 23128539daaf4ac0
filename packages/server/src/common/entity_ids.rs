//! Typed ID definitions for persisted entities.
//!
//! ```rust
//! use server_core::common::{ProblemId, ProgressId};
//!
//! let problem_id = ProblemId::new();
//! let progress_id = ProgressId::new();
//!
//! // This would be a compile error:
//! // let wrong: ProgressId = problem_id;
//! # let _ = (problem_id, progress_id);
//! ```

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for scraped coding problems.
pub struct Problem;

/// Marker type for a learner's progress on one problem.
pub struct Progress;

/// Marker type for a single revealed hint.
pub struct HintReveal;

/// Marker type for a single debug-feedback request.
pub struct DebugSession;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

pub type ProblemId = Id<Problem>;

pub type ProgressId = Id<Progress>;

pub type HintRevealId = Id<HintReveal>;

pub type DebugSessionId = Id<DebugSession>;
