use agenda_core::{
    FlexibleCursor, NoticeKind, Outcome, ScheduleRun, SchedulerConfig, SchedulerError, Task,
    TaskScheduler, TaskStatus, Violation,
};

fn run(tasks: Vec<Task>, config: SchedulerConfig) -> ScheduleRun {
    TaskScheduler::new(tasks, config).unwrap().run()
}

/// A student's day starting at 08:00.
fn school_day() -> Vec<Task> {
    vec![
        Task::new("1", "Breakfast with club")
            .with_start_time(420)
            .with_duration(30)
            .with_priority(1),
        Task::new("2", "Lecture")
            .with_start_time(540)
            .with_duration(90)
            .with_priority(5)
            .with_dependency("3"),
        Task::new("3", "Read lecture notes")
            .with_duration(45)
            .with_importance(5, 2),
        Task::new("4", "Lab")
            .with_start_time(720)
            .with_duration(120)
            .with_priority(3),
        Task::new("5", "Problem set")
            .with_duration(60)
            .with_importance(4, 1)
            .with_dependency("3"),
        Task::new("6", "Gym").with_duration(60).with_importance(0, 8),
    ]
}

#[test]
fn school_day_end_to_end() {
    let run = run(school_day(), SchedulerConfig::starting_at(480));
    let report = run.report();

    assert_eq!(report.outcome, Outcome::Scheduled);

    let slots: Vec<_> = report
        .intervals
        .iter()
        .map(|i| (i.task_id.as_str(), i.start, i.end))
        .collect();
    assert_eq!(
        slots,
        vec![
            ("3", 480, 525),
            ("2", 540, 630),
            ("5", 630, 690),
            ("4", 720, 840),
            ("6", 840, 900),
        ]
    );

    assert_eq!(run.task("1").unwrap().status, TaskStatus::TooEarly);
    assert_eq!(run.task("2").unwrap().sequence_rank, Some(3));
    assert_eq!(run.task("4").unwrap().sequence_rank, Some(2));
    // 3*5 + 2 + 1000*rank(lecture) + 50*one flexible dependent
    assert_eq!(run.task("3").unwrap().utility_score, 3067);

    assert!(report.all_dependencies_cleared());
    assert_eq!(report.totals.span_minutes, 420);
    assert_eq!(report.totals.total_utility, 3088);

    let too_early: Vec<_> = report
        .warnings()
        .filter(|n| n.kind == NoticeKind::TooEarly)
        .collect();
    assert_eq!(too_early.len(), 1);
    assert_eq!(too_early[0].task_id.as_deref(), Some("1"));
}

#[test]
fn runs_are_deterministic() {
    let a = run(school_day(), SchedulerConfig::starting_at(480)).report();
    let b = run(school_day(), SchedulerConfig::starting_at(480)).report();
    assert_eq!(a, b);
}

#[test]
fn every_task_ends_completed_or_too_early() {
    let run = run(school_day(), SchedulerConfig::starting_at(480));
    for task in run.tasks().values() {
        assert!(
            matches!(task.status, TaskStatus::Completed | TaskStatus::TooEarly),
            "{} left in {:?}",
            task.id,
            task.status
        );
    }
}

#[test]
fn fixed_tasks_are_never_moved() {
    let run = run(school_day(), SchedulerConfig::starting_at(480));
    for task in run.tasks().values() {
        if let Some(declared) = task.start_time {
            if declared >= 480 {
                assert_eq!(task.scheduled_start_time, Some(declared), "task {}", task.id);
            }
        }
    }
}

#[test]
fn too_early_tasks_leave_no_interval() {
    let run = run(school_day(), SchedulerConfig::starting_at(480));
    assert!(run.schedule().iter().all(|i| i.task_id != "1"));
    assert_eq!(run.task("1").unwrap().scheduled_start_time, None);
}

#[test]
fn flexible_tasks_respect_lower_bound_and_never_overlap() {
    for cursor in [FlexibleCursor::Reset, FlexibleCursor::Carry] {
        let run = run(
            school_day(),
            SchedulerConfig::starting_at(480).with_cursor(cursor),
        );
        for task in run.tasks().values().filter(|t| t.is_flexible()) {
            assert!(task.scheduled_start_time.unwrap() >= 480);
        }
        assert!(run.schedule().overlapping_pairs().is_empty(), "{cursor:?}");
    }
}

#[test]
fn flexible_dependent_is_not_delayed_by_greedy_scan() {
    // A fixed at [60,90); B only needs 20 minutes and fits before it.
    let tasks = vec![
        Task::new("A", "Seminar").with_start_time(60).with_duration(30),
        Task::new("B", "Write summary").with_duration(20).with_dependency("A"),
    ];
    let run = run(tasks, SchedulerConfig::starting_at(0));

    assert_eq!(run.task("A").unwrap().scheduled_start_time, Some(60));
    assert_eq!(run.task("B").unwrap().scheduled_start_time, Some(0));
    assert_eq!(run.task("A").unwrap().utility_score, 50);

    let check = run.check_dependencies("B").unwrap();
    assert!(matches!(
        check.violation,
        Some(Violation::EndsAfterStart {
            dependency_end: 90,
            task_start: 0,
            ..
        })
    ));
    assert!(!run.report().all_dependencies_cleared());
    assert!(
        run.report()
            .warnings()
            .any(|n| n.kind == NoticeKind::DependencyViolation)
    );
}

#[test]
fn long_flexible_task_is_pushed_past_fixed_block() {
    let tasks = vec![
        Task::new("A", "Seminar").with_start_time(60).with_duration(30),
        Task::new("B", "Essay").with_duration(70),
    ];
    let run = run(tasks, SchedulerConfig::starting_at(0));
    assert_eq!(run.task("B").unwrap().scheduled_start_time, Some(90));
}

#[test]
fn colliding_fixed_tasks_are_both_kept() {
    let tasks = vec![
        Task::new("x", "Advisor call").with_start_time(600).with_duration(30),
        Task::new("y", "Team sync").with_start_time(600).with_duration(30),
    ];
    let run = run(tasks, SchedulerConfig::starting_at(0));

    for id in ["x", "y"] {
        let t = run.task(id).unwrap();
        assert_eq!(t.status, TaskStatus::Completed);
        assert_eq!(t.scheduled_start_time, Some(600));
        assert_eq!(t.scheduled_end_time(), Some(630));
    }
    assert!(
        run.notices()
            .iter()
            .any(|n| n.kind == NoticeKind::FixedOverlap)
    );
}

#[test]
fn validation_is_idempotent() {
    let run = run(school_day(), SchedulerConfig::starting_at(480));
    for id in run.tasks().keys() {
        assert_eq!(
            run.check_dependencies(id).unwrap(),
            run.check_dependencies(id).unwrap()
        );
    }
    assert_eq!(run.report(), run.report());
}

#[test]
fn utility_is_monotone_in_weights() {
    let score = |aci: u32, pi: u32| {
        let tasks = vec![
            Task::new("a", "essay").with_importance(aci, pi),
            Task::new("b", "notes").with_dependency("a"),
        ];
        run(tasks, SchedulerConfig::default())
            .task("a")
            .unwrap()
            .utility_score
    };
    assert!(score(3, 1) >= score(2, 1));
    assert!(score(2, 2) >= score(2, 1));
}

#[test]
fn missing_dependency_fails_before_scheduling() {
    let err = TaskScheduler::new(
        vec![Task::new("a", "essay").with_dependency("zz")],
        SchedulerConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SchedulerError::MissingDependency { .. }));
}

#[test]
fn out_of_range_times_fail_before_scheduling() {
    let late_fixed = TaskScheduler::new(
        vec![Task::new("a", "late").with_start_time(i32::MAX - 5).with_duration(10)],
        SchedulerConfig::starting_at(480),
    );
    assert_eq!(
        late_fixed.unwrap_err(),
        SchedulerError::TimeOutOfRange { task: "a".into() }
    );

    let huge_flexible = TaskScheduler::new(
        vec![
            Task::new("a", "marathon").with_duration(i32::MAX - 10),
            Task::new("b", "stretch").with_duration(30),
        ],
        SchedulerConfig::starting_at(0),
    );
    assert!(matches!(
        huge_flexible.unwrap_err(),
        SchedulerError::TimeOutOfRange { .. }
    ));
}

#[test]
fn tasks_from_an_earlier_pass_are_refused() {
    let mut stale = Task::new("a", "reused").with_importance(5, 0);
    stale.status = TaskStatus::Completed;
    stale.scheduled_start_time = Some(-100);

    let err = TaskScheduler::new(vec![stale], SchedulerConfig::starting_at(480)).unwrap_err();
    assert_eq!(err, SchedulerError::AlreadyScheduled("a".into()));
}

#[test]
fn empty_set_reports_nothing_to_schedule() {
    let report = run(vec![], SchedulerConfig::starting_at(480)).report();
    assert_eq!(report.outcome, Outcome::NothingToSchedule);
    assert!(report.intervals.is_empty());
    assert!(report.tasks.is_empty());
    assert_eq!(report.warnings().count(), 0);
}

#[test]
fn report_serializes_to_json() {
    let report = run(school_day(), SchedulerConfig::starting_at(480)).report();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["outcome"], "scheduled");
    assert_eq!(json["intervals"][0]["task_id"], "3");
    assert_eq!(json["totals"]["span_minutes"], 420);
}
