//! Context threaded through a validation walk

/// Inherited validation state for a subtree
///
/// The walker hands each node the context returned by the visit of its
/// parent block. Once suppression is switched on, every context derived
/// from it keeps it on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationContext {
    suppressed: bool,
}

impl ValidationContext {
    /// Create a context without suppression
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether required-attribute checks are switched off for this subtree
    pub fn has_suppression(&self) -> bool {
        self.suppressed
    }

    /// Derive a context with suppression switched on
    pub fn with_suppression(self) -> Self {
        Self { suppressed: true }
    }
}
