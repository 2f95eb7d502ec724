//! Full optimization runs through the public API.

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use task_nsga::model::{Task, TaskId, WeightConfig};
use task_nsga::observer::NoopObserver;
use task_nsga::ordering::{
    priority_score, ObjectiveEvaluator, ResultAggregator, ALGORITHM, MAX_SOLUTIONS,
};
use task_nsga::{OptimizationResult, OptimizeError, OptimizeRequest, TaskOptimizer};

fn run_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 20, 9, 0, 0).unwrap()
}

fn optimizer() -> TaskOptimizer {
    TaskOptimizer::with_observer(Arc::new(NoopObserver))
}

fn three_tasks() -> Vec<Task> {
    vec![
        Task::new(1, "T1")
            .with_importance(5)
            .with_urgency(5)
            .with_ease(1)
            .with_energy(5)
            .with_duration(30),
        Task::new(2, "T2")
            .with_importance(1)
            .with_urgency(1)
            .with_ease(5)
            .with_energy(1)
            .with_duration(10)
            .depends_on(1),
        Task::new(3, "T3")
            .with_importance(3)
            .with_urgency(3)
            .with_ease(3)
            .with_energy(5)
            .with_duration(20),
    ]
}

fn order_ids(result: &OptimizationResult) -> Vec<TaskId> {
    result.best_solution.task_order.iter().map(|t| t.id).collect()
}

fn position_of(result: &OptimizationResult, id: TaskId) -> usize {
    result
        .best_solution
        .task_order
        .iter()
        .find(|t| t.id == id)
        .map(|t| t.position)
        .unwrap()
}

#[test]
fn three_task_example_keeps_dependency() {
    let request = OptimizeRequest::new(three_tasks()).with_run_start(run_start());
    let result = optimizer().optimize(&request).unwrap();

    assert_eq!(result.algorithm, ALGORITHM);
    assert_eq!(result.total_tasks, 3);
    assert!(position_of(&result, 1) < position_of(&result, 2));
    assert_eq!(result.best_solution.objectives.constraint_violation, 0.0);
    assert_eq!(order_ids(&result), vec![1, 3, 2]);
    assert_eq!(result.best_solution.metrics.total_duration, 60);
}

#[test]
fn every_solution_is_a_permutation_with_1_based_positions() {
    let request = OptimizeRequest::new(three_tasks()).with_run_start(run_start());
    let result = optimizer().optimize(&request).unwrap();

    assert!(!result.solutions.is_empty());
    assert!(result.solutions.len() <= MAX_SOLUTIONS);
    for (i, solution) in result.solutions.iter().enumerate() {
        assert_eq!(solution.solution_id, i + 1);
        let mut ids: Vec<TaskId> = solution.task_order.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3]);
        let positions: Vec<usize> = solution.task_order.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }
    let totals: Vec<f64> = result
        .solutions
        .iter()
        .map(|s| s.objectives.total_score)
        .collect();
    assert!(totals.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn same_seed_same_solutions() {
    let tasks: Vec<Task> = (1..=8)
        .map(|i| {
            let task = Task::new(i, format!("task {i}"))
                .with_importance((i % 5 + 1) as u8)
                .with_urgency(((i * 3) % 5 + 1) as u8)
                .with_duration(15 * i as u32);
            if i % 3 == 0 { task.depends_on(i - 1) } else { task }
        })
        .collect();
    let request = OptimizeRequest::new(tasks)
        .with_run_start(run_start())
        .with_seed(2024);

    let a = optimizer().optimize(&request).unwrap();
    let b = optimizer().optimize(&request).unwrap();
    let sequential = optimizer()
        .optimize(&request.clone().with_parallel(false))
        .unwrap();

    assert_eq!(a.solutions, b.solutions);
    assert_eq!(a.total_solutions, b.total_solutions);
    assert_eq!(a.solutions, sequential.solutions);
    assert_eq!(a.parameters, b.parameters);
}

#[test]
fn empty_task_list_is_invalid_input() {
    let err = optimizer()
        .optimize(&OptimizeRequest::new(Vec::new()))
        .unwrap_err();
    assert_eq!(err, OptimizeError::EmptyTaskList);
}

#[test]
fn fallback_matches_weighted_descending_sort() {
    let weights = WeightConfig {
        importance: 1.0,
        urgency: 4.0,
        ease: 0.5,
        ..WeightConfig::default()
    };
    let tasks: Vec<Task> = (1..=6)
        .map(|i| {
            Task::new(i, format!("t{i}"))
                .with_importance((i % 5 + 1) as u8)
                .with_urgency((7 - i) as u8 % 5 + 1)
                .with_ease((i % 3 + 1) as u8)
        })
        .collect();
    let evaluator = ObjectiveEvaluator::new(&tasks, &weights, run_start(), &NoopObserver);
    let fallback = ResultAggregator::new(&tasks, &evaluator, 10).fallback();

    let mut expected: Vec<&Task> = tasks.iter().collect();
    expected.sort_by(|a, b| priority_score(b, &weights).total_cmp(&priority_score(a, &weights)));
    let expected_ids: Vec<TaskId> = expected.iter().map(|t| t.id).collect();
    let ids: Vec<TaskId> = fallback.best.task_order.iter().map(|t| t.id).collect();
    assert_eq!(ids, expected_ids);

    let sum: f64 = tasks.iter().map(|t| priority_score(t, &weights)).sum();
    assert!((fallback.best.objectives.total_score - sum).abs() < 1e-9);
}

#[test]
fn json_request_round_trip_through_serde() {
    let json = r#"{
        "tasks": [
            {"id": 1, "title": "T1", "duration": 30, "energy_required": 5,
             "importance": 5, "urgency": 5, "ease": 1, "dependencies": []},
            {"id": 2, "title": "T2", "duration": 10, "energy_required": 1,
             "importance": 1, "urgency": 1, "ease": 5, "dependencies": [1],
             "deadline": "2025-07-20T12:00:00Z"}
        ],
        "run_start": "2025-07-20T09:00:00Z",
        "max_solutions": 3
    }"#;
    let request: OptimizeRequest = serde_json::from_str(json).unwrap();
    let result = optimizer().optimize(&request).unwrap();

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["algorithm"], "NSGA-II");
    assert_eq!(value["total_tasks"], 2);
    assert_eq!(value["parameters"]["max_solutions"], 3);
    assert_eq!(value["best_solution"]["task_order"][0]["id"], 1);
    assert!(value["solutions"].as_array().unwrap().len() <= 3);
    // T2 finishes at 09:40, well before its 12:00 deadline.
    assert_eq!(value["best_solution"]["objectives"]["constraint_violation"], 0.0);
}

#[test]
fn missed_deadline_raises_reported_violation() {
    let tasks = vec![
        Task::new(1, "overdue")
            .with_duration(30)
            .with_deadline("2025-07-19T09:00:00Z"),
        Task::new(2, "free").with_duration(30),
    ];
    let request = OptimizeRequest::new(tasks).with_run_start(run_start());
    let result = optimizer().optimize(&request).unwrap();

    // Due a day before the run starts: every order pays the capped penalty.
    for solution in &result.solutions {
        assert_eq!(solution.objectives.constraint_violation, 20.0);
    }
    let best = &result.best_solution.objectives;
    assert!(best.total_score < best.priority_score + best.efficiency_score);
}
