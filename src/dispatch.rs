use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::fire::{fire, RulePath};
use crate::types::FireRecord;
use crate::{AsRule, Continuation, RuleContext, RuleError, Strategy};

/// Run a batch of sibling rules under `strategy`.
///
/// The whole batch is validated before anything fires: every entry must be
/// present, and a chain batch must hold a single rule. `path` is the address of
/// the parent (empty for top-level batches).
pub(crate) fn dispatch<V, N: AsRule<V>>(
    strategy: Strategy,
    context: &RuleContext<V>,
    cancel: &CancellationToken,
    nodes: &[N],
    path: &mut Vec<usize>,
    mut records: Option<&mut Vec<FireRecord>>,
) -> Result<(), RuleError> {
    if nodes.is_empty() {
        return Ok(());
    }
    if let Some(index) = nodes.iter().position(|n| n.as_rule().is_none()) {
        return Err(RuleError::NilNode { index });
    }
    if strategy == Strategy::Chain && nodes.len() > 1 {
        return Err(RuleError::ChainMultipleRoots { count: nodes.len() });
    }

    for (index, node) in nodes.iter().enumerate() {
        let Some(rule) = node.as_rule() else {
            return Err(RuleError::NilNode { index });
        };

        path.push(index);
        let flow = fire(rule, context, cancel, path, records.as_deref_mut());
        path.pop();

        if flow? == Continuation::Stop {
            debug!(
                parent = %RulePath(path),
                index,
                skipped = nodes.len() - index - 1,
                "best-first search satisfied"
            );
            break;
        }
    }
    Ok(())
}
