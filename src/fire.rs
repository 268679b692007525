use std::fmt;

use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::types::{FireRecord, Outcome, Stage};
use crate::{Continuation, Rule, RuleContext, RuleError, RuleView, Strategy};

/// Positional address of a rule within a run, rendered as `0/2/1`.
pub(crate) struct RulePath<'a>(pub(crate) &'a [usize]);

impl fmt::Display for RulePath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}

/// Fire a single rule: cancellation check, evaluation, the three execution
/// stages, then the children under the rule's own strategy.
///
/// `path` holds this rule's address and is restored before returning.
/// Each completed fire is appended to `records` when one is supplied.
pub(crate) fn fire<V>(
    rule: &Rule<V>,
    context: &RuleContext<V>,
    cancel: &CancellationToken,
    path: &mut Vec<usize>,
    mut records: Option<&mut Vec<FireRecord>>,
) -> Result<Continuation, RuleError> {
    if cancel.is_cancelled() {
        debug!(path = %RulePath(path), "run canceled, rule not fired");
        return Err(RuleError::Canceled);
    }

    let view = RuleView::new(context, cancel, rule.strategy, rule.name.as_deref());

    trace!(
        path = %RulePath(path),
        rule = rule.name.as_deref().unwrap_or_default(),
        strategy = %rule.strategy,
        "evaluating rule"
    );
    let proceed = match &rule.on_eval {
        Some(evaluation) => {
            evaluation
                .call(&view)
                .map_err(|source| RuleError::EvaluationFailed {
                    rule: label(rule, path),
                    source,
                })
                .inspect_err(|err| debug!(path = %RulePath(path), %err, "evaluation failed"))?
        }
        None => true,
    };

    if !proceed {
        debug!(path = %RulePath(path), "rule declined");
        if let Some(records) = records.as_deref_mut() {
            records.push(FireRecord::new(path, rule, Outcome::Skipped));
        }
        return Ok(Continuation::Continue);
    }

    let stages = [
        (Stage::PreExecute, &rule.on_pre_execute),
        (Stage::Execute, &rule.on_execute),
        (Stage::PostExecute, &rule.on_post_execute),
    ];
    for (stage, hook) in stages {
        let Some(action) = hook else { continue };
        trace!(path = %RulePath(path), %stage, "running hook");
        action
            .call(&view)
            .map_err(|source| RuleError::ExecutionFailed {
                rule: label(rule, path),
                stage,
                source,
            })
            .inspect_err(|err| debug!(path = %RulePath(path), %err, "hook failed"))?;
    }

    if let Some(records) = records.as_deref_mut() {
        records.push(FireRecord::new(path, rule, Outcome::Executed));
    }

    crate::dispatch::dispatch(rule.strategy, context, cancel, &rule.children, path, records)?;

    Ok(match rule.strategy {
        Strategy::Chain => Continuation::Continue,
        Strategy::BestFirst => Continuation::Stop,
    })
}

fn label<V>(rule: &Rule<V>, path: &[usize]) -> String {
    match &rule.name {
        Some(name) => name.clone(),
        None => format!("#{}", RulePath(path)),
    }
}
