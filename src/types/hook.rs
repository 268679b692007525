use std::fmt;

use super::view::RuleView;

/// Error type a hook may return. Wrapped by the engine into
/// [`RuleError`](super::RuleError) at the rule where it occurred.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

type EvalFn<V> = dyn Fn(&RuleView<'_, V>) -> Result<bool, HookError> + Send + Sync;
type ActionFn<V> = dyn Fn(&RuleView<'_, V>) -> Result<(), HookError> + Send + Sync;

/// The three stages that run once a rule's evaluation passes, in firing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    PreExecute,
    Execute,
    PostExecute,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::PreExecute => write!(f, "pre-execute"),
            Stage::Execute => write!(f, "execute"),
            Stage::PostExecute => write!(f, "post-execute"),
        }
    }
}

/// Decides whether a rule should execute.
///
/// Build one with [`Evaluation::boolean`] when the decision cannot fail, or
/// [`Evaluation::detailed`] when it can.
pub struct Evaluation<V> {
    f: Box<EvalFn<V>>,
}

impl<V: 'static> Evaluation<V> {
    pub fn boolean<F>(f: F) -> Self
    where
        F: Fn(&RuleView<'_, V>) -> bool + Send + Sync + 'static,
    {
        Self {
            f: Box::new(move |view: &RuleView<'_, V>| Ok(f(view))),
        }
    }

    pub fn detailed<F>(f: F) -> Self
    where
        F: Fn(&RuleView<'_, V>) -> Result<bool, HookError> + Send + Sync + 'static,
    {
        Self { f: Box::new(f) }
    }
}

impl<V> Evaluation<V> {
    pub(crate) fn call(&self, view: &RuleView<'_, V>) -> Result<bool, HookError> {
        (self.f)(view)
    }
}

/// A pre-execute, execute, or post-execute hook.
///
/// [`Action::simple`] wraps side effects that cannot fail;
/// [`Action::detailed`] lets the hook abort the rule with an error.
pub struct Action<V> {
    f: Box<ActionFn<V>>,
}

impl<V: 'static> Action<V> {
    pub fn simple<F>(f: F) -> Self
    where
        F: Fn(&RuleView<'_, V>) + Send + Sync + 'static,
    {
        Self {
            f: Box::new(move |view: &RuleView<'_, V>| {
                f(view);
                Ok(())
            }),
        }
    }

    pub fn detailed<F>(f: F) -> Self
    where
        F: Fn(&RuleView<'_, V>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        Self { f: Box::new(f) }
    }
}

impl<V> Action<V> {
    pub(crate) fn call(&self, view: &RuleView<'_, V>) -> Result<(), HookError> {
        (self.f)(view)
    }
}

impl<V> fmt::Debug for Evaluation<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Evaluation(..)")
    }
}

impl<V> fmt::Debug for Action<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}
