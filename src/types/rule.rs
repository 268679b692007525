use std::fmt;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::context::RuleContext;
use super::error::RuleError;
use super::hook::{Action, Evaluation, HookError};
use super::option::RuleOption;
use super::strategy::{Continuation, Strategy};
use super::view::RuleView;

/// A node of a rule tree.
///
/// A rule owns its children and up to four hooks. Firing it runs the evaluation
/// hook, and when that passes, the pre-execute, execute and post-execute hooks in
/// order, then the children under this rule's own [`Strategy`].
///
/// The store and cancellation token are not part of the rule: the runner supplies
/// them on every fire, so a finished tree is immutable and can be re-run against
/// different stores or shared across threads.
///
/// # Example
///
/// ```
/// use dredd::{run_chain, Rule, RuleContext};
///
/// let root = Rule::<i64>::chain()
///     .on_eval(|v| v.context().get("score").is_some_and(|s| s > 10))
///     .on_execute(|v| v.context().set("passed", 1))
///     .with_child(Rule::chain().on_execute(|v| v.context().set("child", 1)));
///
/// let ctx = RuleContext::new().with_entry("score", 42);
/// run_chain(&ctx, &root).unwrap();
/// assert_eq!(ctx.get("child"), Some(1));
/// ```
pub struct Rule<V> {
    pub(crate) strategy: Strategy,
    pub(crate) name: Option<String>,
    pub(crate) children: Vec<Rule<V>>,
    pub(crate) on_eval: Option<Evaluation<V>>,
    pub(crate) on_pre_execute: Option<Action<V>>,
    pub(crate) on_execute: Option<Action<V>>,
    pub(crate) on_post_execute: Option<Action<V>>,
}

impl<V> Rule<V> {
    /// Create a rule with no hooks and no children.
    #[must_use]
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            name: None,
            children: Vec::new(),
            on_eval: None,
            on_pre_execute: None,
            on_execute: None,
            on_post_execute: None,
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

    /// Create a rule and apply `options` to it in order.
    ///
    /// # Panics
    ///
    /// Panics if a [`children`](crate::option::children) option breaks the
    /// chain arity rule or contains a missing child.
    #[must_use]
    pub fn with_options(
        strategy: Strategy,
        options: impl IntoIterator<Item = RuleOption<V>>,
    ) -> Self {
        let mut rule = Self::new(strategy);
        for option in options {
            option.apply(&mut rule);
        }
        rule
    }

    /// Label used in logs, reports and error messages.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn evaluation(mut self, evaluation: Evaluation<V>) -> Self {
        self.on_eval = Some(evaluation);
        self
    }

    #[must_use]
    pub fn pre_execution(mut self, action: Action<V>) -> Self {
        self.on_pre_execute = Some(action);
        self
    }

    #[must_use]
    pub fn execution(mut self, action: Action<V>) -> Self {
        self.on_execute = Some(action);
        self
    }

    #[must_use]
    pub fn post_execution(mut self, action: Action<V>) -> Self {
        self.on_post_execute = Some(action);
        self
    }

    /// Append children, validating the whole batch first.
    ///
    /// Accepts rules or `Option<Rule>`s. Nothing is appended on error.
    ///
    /// # Errors
    ///
    /// - [`RuleError::ChainMultipleChildren`] if this is a chain rule and the
    ///   result would hold more than one child.
    /// - [`RuleError::NilNode`] if an entry of the batch is `None`.
    pub fn add_children<I, C>(&mut self, children: I) -> Result<&mut Self, RuleError>
    where
        I: IntoIterator<Item = C>,
        C: Into<Option<Rule<V>>>,
    {
        let batch: Vec<Option<Rule<V>>> = children.into_iter().map(Into::into).collect();

        if self.strategy == Strategy::Chain && self.children.len() + batch.len() > 1 {
            return Err(RuleError::ChainMultipleChildren);
        }
        if let Some(index) = batch.iter().position(Option::is_none) {
            return Err(RuleError::NilNode { index });
        }

        self.children.extend(batch.into_iter().flatten());
        Ok(self)
    }

    /// Builder form of [`add_children`](Self::add_children).
    ///
    /// # Panics
    ///
    /// Panics when `add_children` would return an error; a malformed tree at
    /// construction time is a programming mistake.
    #[must_use]
    #[track_caller]
    pub fn with_children<I, C>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Option<Rule<V>>>,
    {
        if let Err(err) = self.add_children(children) {
            panic!("invalid rule tree: {err}");
        }
        self
    }

    /// Builder form for a single child.
    ///
    /// # Panics
    ///
    /// Panics if this chain rule already has a child.
    #[must_use]
    #[track_caller]
    pub fn with_child(self, child: Rule<V>) -> Self {
        self.with_children([child])
    }

    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn children(&self) -> &[Rule<V>] {
        &self.children
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Fire this rule once against `context`, then its subtree.
    ///
    /// Returns whether a sibling dispatcher should move on to the next rule:
    /// chain rules always continue, best-first rules stop once they executed.
    ///
    /// # Errors
    ///
    /// [`RuleError::Canceled`] if `cancel` is already signaled, or the first
    /// hook or descendant error encountered.
    pub fn fire(
        &self,
        context: &RuleContext<V>,
        cancel: &CancellationToken,
    ) -> Result<Continuation, RuleError> {
        let mut path = vec![0];
        crate::fire::fire(self, context, cancel, &mut path, None)
    }
}

impl<V: 'static> Rule<V> {
    /// Set an evaluation hook that cannot fail.
    #[must_use]
    pub fn on_eval<F>(self, f: F) -> Self
    where
        F: Fn(&RuleView<'_, V>) -> bool + Send + Sync + 'static,
    {
        self.evaluation(Evaluation::boolean(f))
    }

    #[must_use]
    pub fn on_eval_detailed<F>(self, f: F) -> Self
    where
        F: Fn(&RuleView<'_, V>) -> Result<bool, HookError> + Send + Sync + 'static,
    {
        self.evaluation(Evaluation::detailed(f))
    }

    #[must_use]
    pub fn on_pre_execute<F>(self, f: F) -> Self
    where
        F: Fn(&RuleView<'_, V>) + Send + Sync + 'static,
    {
        self.pre_execution(Action::simple(f))
    }

    #[must_use]
    pub fn on_pre_execute_detailed<F>(self, f: F) -> Self
    where
        F: Fn(&RuleView<'_, V>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.pre_execution(Action::detailed(f))
    }

    #[must_use]
    pub fn on_execute<F>(self, f: F) -> Self
    where
        F: Fn(&RuleView<'_, V>) + Send + Sync + 'static,
    {
        self.execution(Action::simple(f))
    }

    #[must_use]
    pub fn on_execute_detailed<F>(self, f: F) -> Self
    where
        F: Fn(&RuleView<'_, V>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.execution(Action::detailed(f))
    }

    #[must_use]
    pub fn on_post_execute<F>(self, f: F) -> Self
    where
        F: Fn(&RuleView<'_, V>) + Send + Sync + 'static,
    {
        self.post_execution(Action::simple(f))
    }

    #[must_use]
    pub fn on_post_execute_detailed<F>(self, f: F) -> Self
    where
        F: Fn(&RuleView<'_, V>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.post_execution(Action::detailed(f))
    }
}

impl<V> fmt::Display for Rule<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(
                f,
                "Rule{{name: {name}, strategy: {}, children: {}}}",
                self.strategy,
                self.children.len()
            ),
            None => write!(
                f,
                "Rule{{strategy: {}, children: {}}}",
                self.strategy,
                self.children.len()
            ),
        }
    }
}

impl<V> fmt::Debug for Rule<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("strategy", &self.strategy)
            .field("name", &self.name)
            .field("on_eval", &self.on_eval.is_some())
            .field("on_pre_execute", &self.on_pre_execute.is_some())
            .field("on_execute", &self.on_execute.is_some())
            .field("on_post_execute", &self.on_post_execute.is_some())
            .field("children", &self.children)
            .finish()
    }
}

/// Anything a runner accepts as a root rule.
///
/// `None` models a missing entry and is reported as [`RuleError::NilNode`].
pub trait AsRule<V> {
    fn as_rule(&self) -> Option<&Rule<V>>;
}

impl<V> AsRule<V> for Rule<V> {
    fn as_rule(&self) -> Option<&Rule<V>> {
        Some(self)
    }
}

impl<V> AsRule<V> for &Rule<V> {
    fn as_rule(&self) -> Option<&Rule<V>> {
        Some(*self)
    }
}

impl<V> AsRule<V> for Box<Rule<V>> {
    fn as_rule(&self) -> Option<&Rule<V>> {
        Some(self)
    }
}

impl<V> AsRule<V> for Arc<Rule<V>> {
    fn as_rule(&self) -> Option<&Rule<V>> {
        Some(self)
    }
}

impl<V> AsRule<V> for Option<Rule<V>> {
    fn as_rule(&self) -> Option<&Rule<V>> {
        self.as_ref()
    }
}

impl<V> AsRule<V> for Option<&Rule<V>> {
    fn as_rule(&self) -> Option<&Rule<V>> {
        *self
    }
}
