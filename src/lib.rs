//! Embeddable decision-tree rule runner.
//!
//! Build a tree of [`Rule`]s, attach hooks, and walk it with a [`Runner`] (or
//! [`run`]) under one of two strategies:
//!
//! - [`Strategy::Chain`]: a single linear path. A rule whose evaluation declines
//!   ends the path without error.
//! - [`Strategy::BestFirst`]: siblings are tried in order and the first one whose
//!   evaluation passes is executed; the rest are never touched.
//!
//! Hooks share state through a thread-safe [`RuleContext`], and a
//! [`CancellationToken`](tokio_util::sync::CancellationToken) checked before every
//! fire lets another thread stop a run.
//!
//! ```
//! use dredd::{run_chain, Rule, RuleContext};
//!
//! let root = Rule::<bool>::chain()
//!     .on_eval(|v| v.context().must_get("value"))
//!     .on_execute(|v| v.context().set("root", true))
//!     .with_child(
//!         Rule::chain()
//!             .on_eval(|_| false)
//!             .on_execute(|v| v.context().set("child", true)),
//!     );
//!
//! let ctx = RuleContext::new().with_entry("value", true);
//! run_chain(&ctx, &root).unwrap();
//! assert_eq!(ctx.get("root"), Some(true));
//! assert_eq!(ctx.get("child"), None);
//! ```

mod dispatch;
mod fire;
mod types;

pub use types::{
    option, run, run_best_first, run_chain, Action, AsRule, Continuation, Evaluation, FireRecord,
    HookError, Outcome, Rule, RuleContext, RuleError, RuleOption, RuleView, RunReport, Runner,
    Stage, Strategy,
};
