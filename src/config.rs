//! Resource bounds for the reducer.

/// Limits that keep a reduction from running away on pathological input.
///
/// Distribution can blow an expression up exponentially before the
/// reduction laws shrink it again, so both the amount of work and the size
/// of the intermediate tree are capped. Hitting either limit makes
/// [`Reducer::reduce`][crate::reducer::Reducer::reduce] fail with
/// [`ReduceError::ResourceExhausted`][crate::error::ReduceError::ResourceExhausted].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ReducerConfig {
    /// Maximum number of rewrite passes, summed over all phases.
    pub max_passes: usize,
    /// Maximum number of IR nodes after any pass.
    pub max_nodes: usize,
}

impl ReducerConfig {
    pub fn new(max_passes: usize, max_nodes: usize) -> Self {
        assert!(max_passes > 0, "max_passes should be positive");
        assert!(max_nodes > 0, "max_nodes should be positive");
        Self { max_passes, max_nodes }
    }

    pub fn with_max_passes(self, max_passes: usize) -> Self {
        Self::new(max_passes, self.max_nodes)
    }

    pub fn with_max_nodes(self, max_nodes: usize) -> Self {
        Self::new(self.max_passes, max_nodes)
    }
}

impl Default for ReducerConfig {
    fn default() -> Self {
        ReducerConfig::new(2_000, 20_000)
    }
}
