use tokio_util::sync::CancellationToken;

use super::context::RuleContext;
use super::strategy::Strategy;

/// What a hook sees of the rule being fired: the store and cancellation token
/// bound by the current run, plus the rule's own tag and name.
#[derive(Debug)]
pub struct RuleView<'a, V> {
    context: &'a RuleContext<V>,
    cancel: &'a CancellationToken,
    strategy: Strategy,
    name: Option<&'a str>,
}

impl<'a, V> RuleView<'a, V> {
    pub(crate) fn new(
        context: &'a RuleContext<V>,
        cancel: &'a CancellationToken,
        strategy: Strategy,
        name: Option<&'a str>,
    ) -> Self {
        Self {
            context,
            cancel,
            strategy,
            name,
        }
    }

    /// The store bound to this run.
    #[must_use]
    pub fn context(&self) -> &'a RuleContext<V> {
        self.context
    }

    #[must_use]
    pub fn cancellation_token(&self) -> &'a CancellationToken {
        self.cancel
    }

    /// Long-running hooks may poll this; the engine itself only checks on entry.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        self.name
    }
}
