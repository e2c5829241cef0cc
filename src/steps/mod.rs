//! Step handlers behind the Gherkin step phrases.
//!
//! Handlers take the scenario [`TestContext`](crate::context::TestContext)
//! and raw table rows, so any cucumber runner can wire them to its world.

mod re_aging;

pub use re_aging::{ReAgingSteps, RE_AGE_COMMAND, UNDO_RE_AGE_COMMAND};
