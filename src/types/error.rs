use thiserror::Error;

use super::hook::{HookError, Stage};

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("rule context is not bound")]
    NilContext,

    #[error("rule at index {index} is missing")]
    NilNode { index: usize },

    #[error("chain rule can only have one child")]
    ChainMultipleChildren,

    #[error("chain runner only supports one root rule, got {count}")]
    ChainMultipleRoots { count: usize },

    #[error("rule run canceled")]
    Canceled,

    #[error("evaluation of rule '{rule}' failed: {source}")]
    EvaluationFailed {
        rule: String,
        #[source]
        source: HookError,
    },

    #[error("{stage} of rule '{rule}' failed: {source}")]
    ExecutionFailed {
        rule: String,
        stage: Stage,
        #[source]
        source: HookError,
    },
}

impl RuleError {
    /// True for either way of breaking the single-path shape of a chain.
    #[must_use]
    pub fn is_chain_arity(&self) -> bool {
        matches!(
            self,
            RuleError::ChainMultipleChildren | RuleError::ChainMultipleRoots { .. }
        )
    }

    #[must_use]
    pub fn is_canceled(&self) -> bool {
        matches!(self, RuleError::Canceled)
    }
}
