//! Observable lookup events
//!
//! Events are explicit and typed; each phase of a lookup emits exactly one.

use std::fmt;

/// Observable events in the lookup layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupEvent {
    /// Lookup request received
    LookupReceived,
    /// Expression compiled into a stage pipeline
    PipelineCompiled,
    /// Engine call returned
    ExecuteComplete,
    /// All result documents reconciled
    ReconcileComplete,
    /// Lookup aborted with an error
    LookupFailed,
    /// Schema directory loaded into the registry
    SchemasLoaded,
}

impl LookupEvent {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupEvent::LookupReceived => "LOOKUP_RECEIVED",
            LookupEvent::PipelineCompiled => "PIPELINE_COMPILED",
            LookupEvent::ExecuteComplete => "EXECUTE_COMPLETE",
            LookupEvent::ReconcileComplete => "RECONCILE_COMPLETE",
            LookupEvent::LookupFailed => "LOOKUP_FAILED",
            LookupEvent::SchemasLoaded => "SCHEMAS_LOADED",
        }
    }
}

impl fmt::Display for LookupEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(LookupEvent::LookupReceived.as_str(), "LOOKUP_RECEIVED");
        assert_eq!(LookupEvent::PipelineCompiled.as_str(), "PIPELINE_COMPILED");
        assert_eq!(LookupEvent::LookupFailed.as_str(), "LOOKUP_FAILED");
    }
}
