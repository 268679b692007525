use std::fmt;
use std::time::Duration;

use super::rule::Rule;
use super::strategy::Strategy;
use crate::fire::RulePath;

/// What happened to a rule that was fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Evaluation passed and all execution stages ran.
    Executed,
    /// Evaluation declined; no execution stage or child ran.
    Skipped,
}

/// One fired rule in a [`RunReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FireRecord {
    path: String,
    name: Option<String>,
    strategy: Strategy,
    outcome: Outcome,
}

impl FireRecord {
    pub(crate) fn new<V>(path: &[usize], rule: &Rule<V>, outcome: Outcome) -> Self {
        Self {
            path: RulePath(path).to_string(),
            name: rule.name.clone(),
            strategy: rule.strategy,
            outcome,
        }
    }

    /// Positional address in the run, e.g. `0/2` is the third child of the first root.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.path)
    }
}

/// Detailed run report returned by
/// [`Runner::run_detailed()`](super::runner::Runner::run_detailed).
///
/// Lists every fired rule in firing order with its outcome, and the
/// wall-clock duration of the run.
#[derive(Debug, Clone)]
#[must_use]
pub struct RunReport {
    records: Vec<FireRecord>,
    duration: Duration,
}

impl RunReport {
    pub(crate) fn new(records: Vec<FireRecord>, duration: Duration) -> Self {
        Self { records, duration }
    }

    /// Every fired rule, in firing order.
    #[must_use]
    pub fn records(&self) -> &[FireRecord] {
        &self.records
    }

    /// Rules whose execution stages ran, in firing order.
    pub fn executed(&self) -> impl Iterator<Item = &FireRecord> {
        self.records
            .iter()
            .filter(|r| r.outcome == Outcome::Executed)
    }

    /// Rules whose evaluation declined, in firing order.
    pub fn skipped(&self) -> impl Iterator<Item = &FireRecord> {
        self.records
            .iter()
            .filter(|r| r.outcome == Outcome::Skipped)
    }

    /// Wall-clock duration of the run.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let executed: Vec<&str> = self.executed().map(FireRecord::label).collect();
        let skipped: Vec<&str> = self.skipped().map(FireRecord::label).collect();
        write!(f, "executed: [{}]", executed.join(", "))?;
        write!(f, ", skipped: [{}]", skipped.join(", "))?;
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}
