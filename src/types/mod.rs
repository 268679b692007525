mod context;
mod error;
mod hook;
pub mod option;
mod report;
mod rule;
mod runner;
mod strategy;
mod view;

pub use context::RuleContext;
pub use error::RuleError;
pub use hook::{Action, Evaluation, HookError, Stage};
pub use option::RuleOption;
pub use report::{FireRecord, Outcome, RunReport};
pub use rule::{AsRule, Rule};
pub use runner::{run, run_best_first, run_chain, Runner};
pub use strategy::{Continuation, Strategy};
pub use view::RuleView;
