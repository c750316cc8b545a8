use super::{SearchResult, SearchStrategy};
use crate::environment::Environment;

/// Depth-first search stand-in. Does not traverse anything yet.
#[derive(Debug, Default, Clone, Copy)]
pub struct DepthFirstSearch;

impl SearchStrategy for DepthFirstSearch {
    fn name(&self) -> &'static str {
        "depth-first"
    }

    fn look_for_goal(&self, _environment: &mut Environment) -> SearchResult {
        // TODO: stack-based two-phase traversal with a closed set, mirroring breadth-first.
        SearchResult::empty()
    }
}
