//! Stopping rules for the tree planner.

use log::debug;

use crate::config::{PlannerConfig, PlannerVariant};
use crate::result::SearchState;

/// State machine deciding when a run stops.
///
/// ```text
/// Searching ──goal connected──▶ GoalFound ──stagnation_limit idle──▶ Stable
///     │                            │
///     └──────── budget spent / cancelled ──────▶ Exhausted
/// ```
///
/// The plain RRT variant moves straight to `Stable` on the first goal
/// connection.
#[derive(Clone, Debug)]
pub struct TerminationPolicy {
    state: SearchState,
    best_cost: f64,
    last_improvement: usize,
    improvements: usize,
    max_iterations: usize,
    stagnation_limit: usize,
    stop_at_first_goal: bool,
}

impl TerminationPolicy {
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            state: SearchState::Searching,
            best_cost: f64::INFINITY,
            last_improvement: 0,
            improvements: 0,
            max_iterations: config.max_iterations,
            stagnation_limit: config.stagnation_limit,
            stop_at_first_goal: config.variant == PlannerVariant::Rrt,
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Best goal cost seen so far (`INFINITY` until a path exists)
    pub fn best_cost(&self) -> f64 {
        self.best_cost
    }

    /// Number of strict goal-cost decreases
    pub fn improvements(&self) -> usize {
        self.improvements
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Offer a goal candidate found at `iteration`.
    ///
    /// Adopted only when strictly cheaper than the best so far. Returns
    /// whether it was adopted.
    pub fn offer(&mut self, iteration: usize, cost: f64) -> bool {
        if self.is_terminal() || !(cost < self.best_cost) {
            return false;
        }

        if self.state == SearchState::Searching {
            debug!("[RRT*] goal reached at iteration {} (cost {:.3})", iteration, cost);
            self.state = SearchState::GoalFound;
        } else {
            debug!(
                "[RRT*] goal cost {:.3} -> {:.3} at iteration {}",
                self.best_cost, cost, iteration
            );
        }

        self.best_cost = cost;
        self.last_improvement = iteration;
        self.improvements += 1;
        true
    }

    /// Feed back the current cost of the adopted goal connection.
    ///
    /// Rewiring can make the existing connection cheaper without a new
    /// candidate being found; a strict decrease counts as an improvement.
    pub fn refresh(&mut self, iteration: usize, current_cost: f64) -> bool {
        if self.state != SearchState::GoalFound {
            return false;
        }
        self.offer(iteration, current_cost)
    }

    /// Close out `iteration` (1-based count of completed iterations).
    pub fn end_iteration(&mut self, iteration: usize) -> SearchState {
        if self.is_terminal() {
            return self.state;
        }

        if self.state == SearchState::GoalFound {
            if self.stop_at_first_goal {
                self.state = SearchState::Stable;
            } else if iteration - self.last_improvement >= self.stagnation_limit {
                debug!(
                    "[RRT*] stable after {} idle iterations (cost {:.3})",
                    self.stagnation_limit, self.best_cost
                );
                self.state = SearchState::Stable;
            }
        }

        if !self.is_terminal() && iteration >= self.max_iterations {
            debug!("[RRT*] budget of {} iterations exhausted", self.max_iterations);
            self.state = SearchState::Exhausted;
        }

        self.state
    }

    /// Stop immediately
    pub fn cancel(&mut self) {
        if !self.is_terminal() {
            debug!("[RRT*] cancelled");
            self.state = SearchState::Exhausted;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(max_iterations: usize, stagnation: usize) -> TerminationPolicy {
        let config = PlannerConfig::default()
            .with_max_iterations(max_iterations)
            .with_stagnation_limit(stagnation);
        TerminationPolicy::new(&config)
    }

    #[test]
    fn test_exhausts_without_goal() {
        let mut p = policy(3, 10);
        assert_eq!(p.end_iteration(1), SearchState::Searching);
        assert_eq!(p.end_iteration(2), SearchState::Searching);
        assert_eq!(p.end_iteration(3), SearchState::Exhausted);
        assert!(p.best_cost().is_infinite());
    }

    #[test]
    fn test_only_strict_improvements_adopted() {
        let mut p = policy(100, 10);
        assert!(p.offer(1, 12.0));
        assert_eq!(p.state(), SearchState::GoalFound);
        assert!(!p.offer(2, 12.0));
        assert!(!p.offer(3, 13.0));
        assert!(p.offer(4, 11.5));
        assert_eq!(p.best_cost(), 11.5);
        assert_eq!(p.improvements(), 2);
    }

    #[test]
    fn test_stagnation_leads_to_stable() {
        let mut p = policy(1000, 5);
        p.offer(10, 20.0);
        for i in 10..15 {
            assert_eq!(p.end_iteration(i), SearchState::GoalFound);
        }
        assert_eq!(p.end_iteration(15), SearchState::Stable);
        // Terminal states are sticky
        assert!(!p.offer(16, 1.0));
        assert_eq!(p.end_iteration(1000), SearchState::Stable);
    }

    #[test]
    fn test_refresh_resets_stagnation() {
        let mut p = policy(1000, 5);
        p.offer(1, 20.0);
        p.end_iteration(1);
        assert!(p.refresh(4, 19.0));
        for i in 4..9 {
            assert_eq!(p.end_iteration(i), SearchState::GoalFound);
        }
        assert_eq!(p.end_iteration(9), SearchState::Stable);
    }

    #[test]
    fn test_refresh_ignored_while_searching() {
        let mut p = policy(10, 5);
        assert!(!p.refresh(1, 3.0));
        assert_eq!(p.state(), SearchState::Searching);
    }

    #[test]
    fn test_rrt_variant_stops_at_first_goal() {
        let config = PlannerConfig::default().with_variant(PlannerVariant::Rrt);
        let mut p = TerminationPolicy::new(&config);
        p.end_iteration(1);
        p.offer(2, 9.0);
        assert_eq!(p.end_iteration(2), SearchState::Stable);
    }

    #[test]
    fn test_cancel() {
        let mut p = policy(10, 5);
        p.cancel();
        assert_eq!(p.state(), SearchState::Exhausted);
    }
}
