//! Non-fatal expansion diagnostics
//!
//! Diagnostics are itemized: the warning handler is called once per entry,
//! unmapped routes first, then unused mappings, each group sorted ascending.

use std::fmt;

/// A non-fatal finding of an expansion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A dynamic prefix reached during expansion has no mapper; every
    /// branch through it was dropped. Covers missing ancestor mappings too.
    UnmappedRoute(String),

    /// A registered mapper was never invoked during the run
    UnusedMapping(String),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnmappedRoute(route) => write!(f, "Unmapped dynamic route: {}", route),
            Diagnostic::UnusedMapping(route) => write!(f, "Unused dynamic route mapping: {}", route),
        }
    }
}

/// Default warning handler: forwards to `tracing`
pub fn log_warning(message: &str) {
    tracing::warn!("{}", message);
}
