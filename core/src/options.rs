//! Configuration options for binding and substitution.

/// What a substitutor does when a binding expands back into a parameter
/// that is already being expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CyclePolicy {
    /// Report `UnifyError::CyclicBinding`.
    #[default]
    Fail,

    /// Leave the re-entered parameter leaf unsubstituted.
    Preserve,
}

/// Configuration options for walkers, substitutors and collectors.
///
/// # Example
///
/// ```
/// use tybind_core::{CyclePolicy, UnifyOptions};
///
/// let options = UnifyOptions {
///     max_depth: 64,
///     cycle_policy: CyclePolicy::Preserve,
/// };
/// ```
#[derive(Debug, Clone, Copy)]
pub struct UnifyOptions {
    /// Maximum recursion depth (for protection against pathological input).
    ///
    /// Default: 512
    pub max_depth: usize,

    /// Handling of multi-hop binding cycles during substitution.
    ///
    /// Default: `CyclePolicy::Fail`
    pub cycle_policy: CyclePolicy,
}

impl Default for UnifyOptions {
    fn default() -> Self {
        Self {
            max_depth: 512,
            cycle_policy: CyclePolicy::default(),
        }
    }
}
