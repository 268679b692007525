//! Construction-time options for [`Rule::with_options`].
//!
//! ```
//! use dredd::option::{evaluation, execute, name};
//! use dredd::{Action, Evaluation, Rule, Strategy};
//!
//! let rule: Rule<bool> = Rule::with_options(
//!     Strategy::BestFirst,
//!     [
//!         name("fallback"),
//!         evaluation(Evaluation::boolean(|_| true)),
//!         execute(Action::simple(|v| v.context().set("fallback", true))),
//!     ],
//! );
//! assert_eq!(rule.name(), Some("fallback"));
//! ```

use std::fmt;

use super::hook::{Action, Evaluation};
use super::rule::Rule;

/// A deferred mutation applied to a freshly created [`Rule`].
pub struct RuleOption<V> {
    apply: Box<dyn FnOnce(&mut Rule<V>)>,
}

impl<V> RuleOption<V> {
    fn new(apply: impl FnOnce(&mut Rule<V>) + 'static) -> Self {
        Self {
            apply: Box::new(apply),
        }
    }

    pub(crate) fn apply(self, rule: &mut Rule<V>) {
        (self.apply)(rule);
    }
}

impl<V> fmt::Debug for RuleOption<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RuleOption(..)")
    }
}

pub fn name<V: 'static>(name: impl Into<String>) -> RuleOption<V> {
    let name = name.into();
    RuleOption::new(move |rule| rule.name = Some(name))
}

pub fn evaluation<V: 'static>(evaluation: Evaluation<V>) -> RuleOption<V> {
    RuleOption::new(move |rule| rule.on_eval = Some(evaluation))
}

pub fn pre_execute<V: 'static>(action: Action<V>) -> RuleOption<V> {
    RuleOption::new(move |rule| rule.on_pre_execute = Some(action))
}

pub fn execute<V: 'static>(action: Action<V>) -> RuleOption<V> {
    RuleOption::new(move |rule| rule.on_execute = Some(action))
}

pub fn post_execute<V: 'static>(action: Action<V>) -> RuleOption<V> {
    RuleOption::new(move |rule| rule.on_post_execute = Some(action))
}

/// Attach children when the option is applied.
///
/// Applying it panics if the children break the chain arity rule or one of
/// them is `None`.
pub fn children<V, I, C>(children: I) -> RuleOption<V>
where
    V: 'static,
    I: IntoIterator<Item = C>,
    C: Into<Option<Rule<V>>>,
{
    let batch: Vec<Option<Rule<V>>> = children.into_iter().map(Into::into).collect();
    RuleOption::new(move |rule| {
        if let Err(err) = rule.add_children(batch) {
            panic!("invalid rule tree: {err}");
        }
    })
}
