//! Observability for aerojoin
//!
//! Structured JSON event logging, one line per event.
//!
//! # Design Principles
//!
//! - Logs are synchronous, no buffering
//! - Deterministic rendering: same event, same line
//! - Events are explicit and typed

mod events;
mod logger;

pub use events::LookupEvent;
pub use logger::{Logger, Severity};
