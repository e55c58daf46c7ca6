//! Human-readable plan output.

use agenda_core::{format_clock, format_span, NoticeKind, ScheduleReport, TaskStatus};

/// Render a report as the lines printed by `agenda plan`.
///
/// With `verbose`, placement notices are listed first, in the order the
/// pass made them.
pub fn render_text(report: &ScheduleReport, verbose: bool) -> Vec<String> {
    let mut out = Vec::new();

    if report.is_empty() {
        out.push("No tasks scheduled. Enjoy your day!".to_string());
        return out;
    }

    for n in &report.notices {
        match n.kind {
            NoticeKind::TooEarly => out.push(format!("!! {}", n.message)),
            NoticeKind::FixedOverlap => out.push(format!("!  {}", n.message)),
            NoticeKind::FixedPlaced | NoticeKind::FlexiblePlaced if verbose => {
                out.push(n.message.clone())
            }
            _ => {}
        }
    }
    if !out.is_empty() {
        out.push(String::new());
    }

    out.push(format!(
        "Final Task Scheduling Results (from {}):",
        format_clock(report.starting_time)
    ));
    out.push("------------------------------".to_string());

    for slot in &report.intervals {
        let Some(task) = report.task(&slot.task_id) else { continue };

        if !task.dependency_check.passed() {
            out.push(format!(
                "Dependency issue for Task {} ('{}'): {}. Please re-check the tasks' input.",
                task.id,
                task.description,
                task.dependency_check.reason()
            ));
            continue;
        }

        let status = if task.status == TaskStatus::Completed {
            "Completed"
        } else {
            "Not Started or In Queue"
        };
        out.push(format!(
            "{} - {}: Task {} ('{}') - {}, Utility Score: {}.",
            format_clock(slot.start),
            format_clock(slot.end),
            task.id,
            task.description,
            status,
            task.utility_score
        ));
    }

    out.push(String::new());
    if report.all_dependencies_cleared() {
        out.push("All tasks scheduled successfully with dependencies cleared.".to_string());
        out.push(format!(
            "All the tasks have been completed in {} (earliest start to latest end), with an overall utility value of {}",
            format_span(report.totals.span_minutes),
            report.totals.total_utility
        ));
    } else {
        out.push(
            "Some tasks could not be scheduled due to dependency issues. Please re-check the tasks' input."
                .to_string(),
        );
    }

    out
}
