use std::time::{Duration, Instant};
use tracing::info;

use super::Phase;

#[derive(Debug)]
pub struct SearchStatistics {
    /// Number of nodes expanded
    expanded_nodes: usize,
    /// Number of child nodes pushed on the frontier
    generated_nodes: usize,
    /// Number of dequeued nodes skipped because their state was already expanded
    skipped_nodes: usize,
    /// Time when the search started
    search_start_time: Instant,
}

impl SearchStatistics {
    pub fn new(strategy: &'static str) -> Self {
        info!(strategy, "starting search");
        Self {
            expanded_nodes: 0,
            generated_nodes: 0,
            skipped_nodes: 0,
            search_start_time: Instant::now(),
        }
    }

    pub fn increment_expanded_nodes(&mut self) {
        self.expanded_nodes += 1;
    }

    pub fn increment_generated_nodes(&mut self, num_nodes: usize) {
        self.generated_nodes += num_nodes;
    }

    pub fn increment_skipped_nodes(&mut self) {
        self.skipped_nodes += 1;
    }

    pub fn expanded_nodes(&self) -> usize {
        self.expanded_nodes
    }

    pub fn elapsed(&self) -> Duration {
        self.search_start_time.elapsed()
    }

    pub(crate) fn phase_completed(&self, phase: Phase, depth: usize) {
        info!(?phase, depth, "phase goal reached");
        self.log();
    }

    fn log(&self) {
        info!(
            expanded_nodes = self.expanded_nodes,
            generated_nodes = self.generated_nodes,
            skipped_nodes = self.skipped_nodes,
        );
    }

    pub fn finalise_search(&self, solution_found: bool) {
        info!(solution_found, "finalising search");
        self.log();
        info!(search_duration = self.elapsed().as_secs_f64());
    }
}
