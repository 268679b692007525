use std::time::Instant;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::context::RuleContext;
use super::error::RuleError;
use super::report::RunReport;
use super::rule::AsRule;
use super::strategy::Strategy;

/// Run `nodes` as one top-level batch under `strategy`.
///
/// - [`Strategy::Chain`] takes exactly one root and fires it.
/// - [`Strategy::BestFirst`] fires the roots in order until one executes.
///
/// An empty batch succeeds without doing anything.
///
/// # Errors
///
/// - [`RuleError::NilNode`] if an entry is `None`, before anything fires.
/// - [`RuleError::ChainMultipleRoots`] for a chain batch of two or more roots,
///   before anything fires.
/// - [`RuleError::Canceled`] once `cancel` is signaled.
/// - The first hook error raised anywhere in the tree.
pub fn run<V, N: AsRule<V>>(
    strategy: Strategy,
    cancel: &CancellationToken,
    context: &RuleContext<V>,
    nodes: &[N],
) -> Result<(), RuleError> {
    crate::dispatch::dispatch(strategy, context, cancel, nodes, &mut Vec::new(), None)
}

/// Run a single chain root with a token that is never canceled.
///
/// # Errors
///
/// See [`run`].
pub fn run_chain<V, N: AsRule<V>>(context: &RuleContext<V>, root: &N) -> Result<(), RuleError> {
    run(
        Strategy::Chain,
        &CancellationToken::new(),
        context,
        std::slice::from_ref(root),
    )
}

/// Run best-first roots with a token that is never canceled.
///
/// # Errors
///
/// See [`run`].
pub fn run_best_first<V, N: AsRule<V>>(
    context: &RuleContext<V>,
    nodes: &[N],
) -> Result<(), RuleError> {
    run(Strategy::BestFirst, &CancellationToken::new(), context, nodes)
}

/// Builder for a run.
///
/// # Example
///
/// ```
/// use dredd::{Rule, RuleContext, Runner};
/// use tokio_util::sync::CancellationToken;
///
/// let rules = vec![
///     Rule::<&'static str>::best_first().on_eval(|v| v.context().get("tier") == Some("gold")),
///     Rule::best_first().on_execute(|v| v.context().set("offer", "standard")),
/// ];
///
/// let ctx = RuleContext::new().with_entry("tier", "silver");
/// let token = CancellationToken::new();
/// Runner::best_first()
///     .context(&ctx)
///     .cancellation(token)
///     .run(&rules)
///     .unwrap();
/// assert_eq!(ctx.get("offer"), Some("standard"));
/// ```
#[derive(Debug)]
pub struct Runner<'a, V> {
    strategy: Strategy,
    context: Option<&'a RuleContext<V>>,
    cancel: CancellationToken,
}

impl<'a, V> Runner<'a, V> {
    #[must_use]
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            context: None,
            cancel: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn chain() -> Self {
        Self::new(Strategy::Chain)
    }

    #[must_use]
    pub fn best_first() -> Self {
        Self::new(Strategy::BestFirst)
    }

    /// Bind the store hooks will read and write.
    #[must_use]
    pub fn context(mut self, context: &'a RuleContext<V>) -> Self {
        self.context = Some(context);
        self
    }

    /// Replace the default, never-canceled token.
    #[must_use]
    pub fn cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Run `nodes` with the configured strategy, store and token.
    ///
    /// # Errors
    ///
    /// [`RuleError::NilContext`] if no store was bound, otherwise as [`run`].
    pub fn run<N: AsRule<V>>(&self, nodes: &[N]) -> Result<(), RuleError> {
        let context = self.context.ok_or(RuleError::NilContext)?;
        run(self.strategy, &self.cancel, context, nodes)
    }

    /// Like [`run`](Self::run), also recording every fired rule.
    ///
    /// # Errors
    ///
    /// As [`run`](Self::run). No partial report is returned on error.
    pub fn run_detailed<N: AsRule<V>>(&self, nodes: &[N]) -> Result<RunReport, RuleError> {
        let context = self.context.ok_or(RuleError::NilContext)?;
        let start = Instant::now();
        let mut records = Vec::new();
        crate::dispatch::dispatch(
            self.strategy,
            context,
            &self.cancel,
            nodes,
            &mut Vec::new(),
            Some(&mut records),
        )?;
        let report = RunReport::new(records, start.elapsed());
        debug!(
            strategy = %self.strategy,
            fired = report.records().len(),
            duration = ?report.duration(),
            "run finished"
        );
        Ok(report)
    }
}
