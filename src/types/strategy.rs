use std::fmt;

/// How a batch of sibling rules is traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// A strict linear path: one root, and every rule owns at most one child.
    Chain,
    /// Ordered search: siblings are tried in order and the first one whose
    /// evaluation passes is executed. Later siblings are not touched.
    BestFirst,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Chain => write!(f, "chain"),
            Strategy::BestFirst => write!(f, "best-first"),
        }
    }
}

/// Signal returned by a fire telling the dispatcher whether to try the next sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Continuation {
    Continue,
    Stop,
}

impl Continuation {
    #[must_use]
    pub fn should_continue(self) -> bool {
        matches!(self, Continuation::Continue)
    }
}
