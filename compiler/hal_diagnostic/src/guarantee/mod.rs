//! Proof that a fatal diagnostic was reported.

use std::fmt;

/// Type-level proof that a compilation unit was aborted by a reported fatal
/// diagnostic.
///
/// The only way to obtain one is [`DiagnosticSink::fatal`](crate::DiagnosticSink::fatal)
/// (or [`DiagnosticQueue::aborted`](crate::DiagnosticQueue::aborted) after the
/// fact), so a stage returning `Err(Aborted)` cannot forget to say why.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Aborted(());

impl Aborted {
    pub(crate) const fn new() -> Self {
        Aborted(())
    }
}

impl fmt::Display for Aborted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "compilation unit aborted")
    }
}

impl std::error::Error for Aborted {}
