//! Integration tests for the RRT* tree planner.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use vastu_plan::collision::{Obstacle, ObstacleField};
use vastu_plan::config::{IndexKind, PlannerVariant};
use vastu_plan::core::{Point2, Point3, steer};
use vastu_plan::planner::{RrtStarPlanner, plan};
use vastu_plan::{PathFailure, SearchState};

// ============================================================================
// Tree invariants
// ============================================================================

#[test]
fn test_cost_invariant_holds_after_every_iteration() {
    let (start, goal) = common::line_endpoints();
    let planner = RrtStarPlanner::new(common::config(3, 800), common::midpoint_block(2.0, 0.0)).unwrap();

    let mut run = planner.begin(start, goal).unwrap();
    loop {
        let state = run.step();
        if let Err(e) = run.tree().validate(1e-9) {
            panic!("tree invalid after iteration {}: {}", run.iteration(), e);
        }
        if state.is_terminal() {
            break;
        }
    }

    let result = run.finish();
    assert!(result.stats.iterations <= 800);
}

#[test]
fn test_cost_invariant_in_three_dimensions() {
    let obstacles = ObstacleField::new(vec![Obstacle::new(Point3::new(2.5, 2.5, 2.5), 1.0)]);
    let planner = RrtStarPlanner::new(common::config(11, 600), obstacles).unwrap();
    let mut run = planner
        .begin(Point3::new(0.0, 0.0, 0.0), Point3::new(5.0, 5.0, 5.0))
        .unwrap();
    while !run.step().is_terminal() {
        assert!(run.tree().validate(1e-9).is_ok());
    }
}

#[test]
fn test_steer_to_self_is_identity() {
    let a = Point2::new(3.0, -4.0);
    for step in [1e-9, 0.5, 1.0, 100.0] {
        let p = steer(&a, &a, step);
        assert_eq!(p, a);
        assert!(p.is_finite());
    }
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_same_seed_same_result() {
    let (start, goal) = common::line_endpoints();
    let field = || common::midpoint_block(2.0, 0.1);

    let a = RrtStarPlanner::new(common::config(99, 1500), field())
        .unwrap()
        .plan(start, goal)
        .unwrap();
    let b = RrtStarPlanner::new(common::config(99, 1500), field())
        .unwrap()
        .plan(start, goal)
        .unwrap();

    assert_eq!(a.path, b.path);
    assert_eq!(a.cost, b.cost);
    assert_eq!(a.search_tree, b.search_tree);
    assert_eq!(a.stats.iterations, b.stats.iterations);
    assert_eq!(a.stats.nodes_generated, b.stats.nodes_generated);
    assert_eq!(a.stats.rewires, b.stats.rewires);
    assert_eq!(a.stats.state, b.stats.state);
}

#[test]
fn test_index_kinds_give_identical_runs() {
    let (start, goal) = common::line_endpoints();
    for seed in [1, 2, 3] {
        let linear = RrtStarPlanner::new(
            common::config(seed, 700).with_index(IndexKind::Linear),
            common::midpoint_block(1.5, 0.0),
        )
        .unwrap()
        .plan(start, goal)
        .unwrap();
        let rtree = RrtStarPlanner::new(
            common::config(seed, 700).with_index(IndexKind::RTree),
            common::midpoint_block(1.5, 0.0),
        )
        .unwrap()
        .plan(start, goal)
        .unwrap();

        assert_eq!(linear.path, rtree.path, "seed {}", seed);
        assert_eq!(linear.cost, rtree.cost, "seed {}", seed);
        assert_eq!(linear.search_tree, rtree.search_tree, "seed {}", seed);
    }
}

// ============================================================================
// Path quality
// ============================================================================

#[test]
fn test_straight_line_converges_for_most_seeds() {
    let (start, goal) = common::line_endpoints();
    let seeds = 40;
    let mut within = 0;

    for seed in 1000..1000 + seeds {
        let result = plan(start, goal, &common::config(seed, 2000)).unwrap();
        assert!(result.is_success(), "seed {} found no path", seed);
        assert!(result.cost >= 10.0 - 1e-9);
        if result.cost <= 10.0 * 1.05 {
            within += 1;
        }
    }

    assert!(
        within * 100 >= seeds * 95,
        "only {}/{} runs within 5% of optimum",
        within,
        seeds
    );
}

#[test]
fn test_path_avoids_midpoint_obstacle() {
    let (start, goal) = common::line_endpoints();
    let center = Point2::new(5.0, 0.0);

    for seed in [5, 6, 7] {
        // Planner uses a small margin; the path must clear the bare disc
        let planner =
            RrtStarPlanner::new(common::config(seed, 2000), common::midpoint_block(2.0, 0.1)).unwrap();
        let result = planner.plan(start, goal).unwrap();

        match result.failure {
            None => {
                assert_eq!(result.path.first(), Some(&start));
                assert_eq!(result.path.last(), Some(&goal));
                let clearance = common::path_clearance(&result.path, &center, 2.0);
                assert!(clearance > 0.0, "seed {}: path clips obstacle by {}", seed, -clearance);
                // Any detour around a radius-2 disc is longer than the straight line
                assert!(result.cost > 10.0);
                assert!((common::polyline_length(&result.path) - result.cost).abs() < 1e-6);
            }
            Some(reason) => assert_eq!(reason, PathFailure::NoPath),
        }
    }
}

#[test]
fn test_enclosed_goal_reports_no_path() {
    // Ring of discs around the goal
    let goal = Point2::new(10.0, 0.0);
    let ring: Vec<Obstacle<2>> = (0..24)
        .map(|i| {
            let a = i as f64 * std::f64::consts::TAU / 24.0;
            Obstacle::new(Point2::new(10.0 + 3.0 * a.cos(), 3.0 * a.sin()), 0.6)
        })
        .collect();

    let config = common::config(4, 600);
    let planner = RrtStarPlanner::new(config, ObstacleField::new(ring)).unwrap();
    let result = planner.plan(Point2::new(0.0, 0.0), goal).unwrap();

    assert_eq!(result.failure, Some(PathFailure::NoPath));
    assert!(result.path.is_empty());
    assert!(result.cost.is_infinite());
    assert_eq!(result.stats.state, SearchState::Exhausted);
    assert_eq!(result.stats.iterations, 600);
    assert!(result.stats.rejected_collision > 0);
    assert!(!result.search_tree.is_empty());
}

#[test]
fn test_rewiring_improves_on_plain_rrt() {
    let (start, goal) = common::line_endpoints();
    let mut star_total = 0.0;
    let mut rrt_total = 0.0;
    for seed in 0..10 {
        let star = plan(start, goal, &common::config(seed, 2000)).unwrap();
        let rrt = plan(
            start,
            goal,
            &common::config(seed, 2000).with_variant(PlannerVariant::Rrt),
        )
        .unwrap();
        assert!(rrt.is_success());
        assert_eq!(rrt.stats.rewires, 0);
        star_total += star.cost;
        rrt_total += rrt.cost;
    }
    assert!(star_total <= rrt_total + 1e-9);
}

#[test]
fn test_stats_are_consistent() {
    let (start, goal) = common::line_endpoints();
    let result = plan(start, goal, &common::config(21, 1500)).unwrap();
    let stats = &result.stats;

    assert!(result.is_success());
    assert!(stats.goal_improvements >= 1);
    assert!(stats.nodes_generated <= stats.iterations);
    assert_eq!(result.search_tree.len(), stats.nodes_generated);
    assert_eq!(stats.path_nodes, result.path.len());
    assert!(matches!(stats.state, SearchState::Stable | SearchState::Exhausted));

    let breakdown = stats.breakdown.as_ref().unwrap();
    assert_eq!(breakdown.weights, vec![2.0, 1.0]);
    let expected = 2.0 * breakdown.axis_deltas[0] + breakdown.axis_deltas[1];
    assert!((breakdown.weighted_total - expected).abs() < 1e-9);
    assert!(breakdown.axis_deltas[0] >= 10.0 - 1e-9);
}

#[test]
fn test_short_axis_weights_default_to_one() {
    let (start, goal) = common::line_endpoints();
    let mut config = common::config(21, 1500);
    config.axis_weights = vec![3.0];
    let result = plan(start, goal, &config).unwrap();

    assert!(result.is_success());
    let breakdown = result.stats.breakdown.as_ref().unwrap();
    assert_eq!(breakdown.weights, vec![3.0, 1.0]);
    let expected = 3.0 * breakdown.axis_deltas[0] + breakdown.axis_deltas[1];
    assert!((breakdown.weighted_total - expected).abs() < 1e-9);
}

// ============================================================================
// Concurrency and cancellation
// ============================================================================

#[test]
fn test_independent_runs_on_threads() {
    let (start, goal) = common::line_endpoints();
    let handles: Vec<_> = (0..4u64)
        .map(|seed| {
            thread::spawn(move || {
                let planner =
                    RrtStarPlanner::new(common::config(seed, 800), common::midpoint_block(1.0, 0.0))
                        .unwrap();
                planner.plan(start, goal).unwrap().cost
            })
        })
        .collect();

    for (seed, handle) in handles.into_iter().enumerate() {
        let threaded = handle.join().unwrap();
        let local = RrtStarPlanner::new(
            common::config(seed as u64, 800),
            common::midpoint_block(1.0, 0.0),
        )
        .unwrap()
        .plan(start, goal)
        .unwrap()
        .cost;
        assert_eq!(threaded.to_bits(), local.to_bits());
    }
}

#[test]
fn test_cancellation_flag_stops_run() {
    let (start, goal) = common::line_endpoints();
    let config = common::config(8, 5_000_000).with_stagnation_limit(5_000_000);
    let planner = RrtStarPlanner::free_space(config).unwrap();

    let flag = Arc::new(AtomicBool::new(false));
    let setter = {
        let flag = Arc::clone(&flag);
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            flag.store(true, Ordering::Relaxed);
        })
    };

    let result = planner.plan_with_cancel(start, goal, Some(&flag)).unwrap();
    setter.join().unwrap();

    assert!(result.stats.iterations < 5_000_000);
    assert_eq!(result.stats.state, SearchState::Exhausted);
    match result.failure {
        None => assert!(result.cost >= 10.0 - 1e-9),
        Some(reason) => assert_eq!(reason, PathFailure::Cancelled),
    }
}
