//! Stage data model consumed by execution engines
//!
//! A compiled pipeline is a flat stage sequence. Each leaf predicate
//! contributes a join stage (attach matched related documents under a
//! side-channel key) followed by a filter stage (drop host documents with
//! no matches). Stages are plain data: any engine that honors these
//! semantics can execute them.

use crate::expr::Condition;

/// How a target document's identifier is matched against the host field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Identifier equals the host field value (singular reference)
    Equals,
    /// Identifier is a member of the host field array (multi-valued)
    ContainedIn,
}

impl MatchMode {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Equals => "equals",
            MatchMode::ContainedIn => "contained_in",
        }
    }
}

/// Join stage: attach matched related documents to each host document
#[derive(Debug, Clone, PartialEq)]
pub struct JoinStage {
    /// Collection the reference points into
    pub target_collection: String,
    /// Side-channel key the matched set is attached under
    pub as_key: String,
    /// Reference field on the host document
    pub host_field: String,
    /// Filter over candidate target documents
    pub filter: Condition,
    /// Identifier match mode
    pub match_mode: MatchMode,
}

/// One stage of a compiled pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    /// Attach matched related documents under a side-channel key
    Join(JoinStage),
    /// Drop host documents whose side-channel array is empty
    RequireNonEmpty {
        /// Side-channel key to check
        field: String,
    },
}

impl Stage {
    /// Returns the stage name
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Join(_) => "JOIN",
            Stage::RequireNonEmpty { .. } => "REQUIRE_NON_EMPTY",
        }
    }

    /// Returns a one-line summary for explain output and logs
    pub fn summary(&self) -> String {
        match self {
            Stage::Join(join) => format!(
                "JOIN {} via {} ({}) as {}",
                join.target_collection,
                join.host_field,
                join.match_mode.as_str(),
                join.as_key
            ),
            Stage::RequireNonEmpty { field } => format!("REQUIRE_NON_EMPTY {}", field),
        }
    }
}
