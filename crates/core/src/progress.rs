//! Progress and status aggregation for tasks and goals.
//!
//! These are the only cross-cutting arithmetic rules in the service. Handlers
//! use them to decorate responses and build the stats endpoints, and any
//! presentation layer should call the same functions instead of re-deriving
//! the numbers.
//!
//! Progress is a real number in `0.0..=100.0` and is never rounded here.

use serde::Serialize;

/// Completed and total counts of a parent's checklist items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubitemCounts {
    pub done: usize,
    pub total: usize,
}

impl SubitemCounts {
    /// Count the completed flags of a parent's subitems.
    pub fn from_flags<I: IntoIterator<Item = bool>>(flags: I) -> Self {
        flags.into_iter().fold(Self::default(), |acc, done| Self {
            done: acc.done + usize::from(done),
            total: acc.total + 1,
        })
    }

    fn percentage(self) -> Option<f64> {
        (self.total > 0).then(|| self.done as f64 / self.total as f64 * 100.0)
    }
}

/// Derived status label, distinct from the raw completed flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Status {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Ready to Complete")]
    ReadyToComplete,
    #[serde(rename = "Completed")]
    Completed,
}

/// Progress of a task.
///
/// Without subtasks the task is all-or-nothing on its own completed flag.
/// With subtasks only the subtasks count, whatever the flag says.
pub fn task_progress(completed: bool, counts: SubitemCounts) -> f64 {
    counts
        .percentage()
        .unwrap_or(if completed { 100.0 } else { 0.0 })
}

/// Progress of a goal: completed subgoals over all subgoals, 0 without any.
///
/// The goal's own completed flag does not contribute.
pub fn goal_progress(counts: SubitemCounts) -> f64 {
    counts.percentage().unwrap_or(0.0)
}

/// Mean of the given progress values, 0 for an empty list.
pub fn overall_progress<I: IntoIterator<Item = f64>>(progresses: I) -> f64 {
    let (sum, n) = progresses
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), p| (sum + p, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Status label for an item with the given flag and progress.
///
/// A fully checked-off item that has not been marked completed is
/// `ReadyToComplete`, never `Completed`.
pub fn status_for(completed: bool, progress: f64) -> Status {
    if completed {
        Status::Completed
    } else if progress <= 0.0 {
        Status::NotStarted
    } else if progress >= 100.0 {
        Status::ReadyToComplete
    } else {
        Status::InProgress
    }
}

/// Anything with a completed flag and a checklist of subitems.
pub trait Checklist {
    fn is_completed(&self) -> bool;

    fn subitem_counts(&self) -> SubitemCounts;

    /// Progress under the rule that applies to this kind of item.
    fn progress(&self) -> f64;

    fn status(&self) -> Status {
        status_for(self.is_completed(), self.progress())
    }
}

/// Per-status counts inside a [`ProgressSummary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub not_started: usize,
    pub in_progress: usize,
    pub ready_to_complete: usize,
    pub completed: usize,
}

impl StatusCounts {
    fn record(&mut self, status: Status) {
        match status {
            Status::NotStarted => self.not_started += 1,
            Status::InProgress => self.in_progress += 1,
            Status::ReadyToComplete => self.ready_to_complete += 1,
            Status::Completed => self.completed += 1,
        }
    }
}

/// Dashboard statistics over a user's tasks or goals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub total: usize,
    /// Items whose completed flag is set.
    pub completed: usize,
    pub overall_progress: f64,
    pub by_status: StatusCounts,
}

impl ProgressSummary {
    pub fn from_items<C: Checklist>(items: &[C]) -> Self {
        let mut by_status = StatusCounts::default();
        for item in items {
            by_status.record(item.status());
        }
        Self {
            total: items.len(),
            completed: items.iter().filter(|i| i.is_completed()).count(),
            overall_progress: overall_progress(items.iter().map(Checklist::progress)),
            by_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeTask {
        completed: bool,
        subtasks: Vec<bool>,
    }

    impl Checklist for FakeTask {
        fn is_completed(&self) -> bool {
            self.completed
        }
        fn subitem_counts(&self) -> SubitemCounts {
            SubitemCounts::from_flags(self.subtasks.iter().copied())
        }
        fn progress(&self) -> f64 {
            task_progress(self.completed, self.subitem_counts())
        }
    }

    fn task(completed: bool, subtasks: &[bool]) -> FakeTask {
        FakeTask {
            completed,
            subtasks: subtasks.to_vec(),
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // -- task_progress -------------------------------------------------------

    #[test]
    fn task_without_subtasks_follows_flag() {
        assert_eq!(task(false, &[]).progress(), 0.0);
        assert_eq!(task(true, &[]).progress(), 100.0);
    }

    #[test]
    fn task_with_subtasks_ignores_flag() {
        assert_eq!(task(true, &[false, false]).progress(), 0.0);
        assert_eq!(task(false, &[true, true]).progress(), 100.0);
    }

    #[test]
    fn task_progress_is_not_rounded() {
        assert!(approx(task(false, &[true, false, false]).progress(), 100.0 / 3.0));
        assert!(approx(task(false, &[true, true, false]).progress(), 200.0 / 3.0));
    }

    // -- goal_progress -------------------------------------------------------

    #[test]
    fn goal_without_subgoals_is_zero() {
        assert_eq!(goal_progress(SubitemCounts::default()), 0.0);
    }

    #[test]
    fn goal_one_of_three() {
        let counts = SubitemCounts::from_flags([true, false, false]);
        assert_eq!(counts, SubitemCounts { done: 1, total: 3 });
        assert!(approx(goal_progress(counts), 33.333_333_333));
    }

    // -- overall_progress ----------------------------------------------------

    #[test]
    fn overall_of_empty_is_zero() {
        assert_eq!(overall_progress(std::iter::empty()), 0.0);
    }

    #[test]
    fn overall_is_mean() {
        assert_eq!(overall_progress([0.0, 100.0, 50.0]), 50.0);
    }

    // -- status --------------------------------------------------------------

    #[test]
    fn completed_flag_wins() {
        assert_eq!(task(true, &[false]).status(), Status::Completed);
    }

    #[test]
    fn status_from_progress() {
        assert_eq!(task(false, &[]).status(), Status::NotStarted);
        assert_eq!(task(false, &[false, false]).status(), Status::NotStarted);
        assert_eq!(task(false, &[true, false]).status(), Status::InProgress);
    }

    #[test]
    fn fully_checked_but_unflagged_is_ready_not_completed() {
        let t = task(false, &[true]);
        assert_eq!(t.progress(), 100.0);
        assert_eq!(t.status(), Status::ReadyToComplete);
    }

    #[test]
    fn status_serializes_with_spaces() {
        assert_eq!(
            serde_json::to_string(&Status::ReadyToComplete).unwrap(),
            "\"Ready to Complete\""
        );
        assert_eq!(
            serde_json::to_string(&Status::NotStarted).unwrap(),
            "\"Not Started\""
        );
    }

    // -- summary -------------------------------------------------------------

    #[test]
    fn summary_counts_each_status() {
        let items = vec![
            task(true, &[]),
            task(false, &[]),
            task(false, &[true, false]),
            task(false, &[true]),
        ];
        let summary = ProgressSummary::from_items(&items);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.completed, 1);
        assert_eq!(
            summary.by_status,
            StatusCounts {
                not_started: 1,
                in_progress: 1,
                ready_to_complete: 1,
                completed: 1,
            }
        );
        assert_eq!(summary.overall_progress, (100.0 + 0.0 + 50.0 + 100.0) / 4.0);
    }

    #[test]
    fn summary_of_nothing() {
        let summary = ProgressSummary::from_items::<FakeTask>(&[]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.overall_progress, 0.0);
    }
}
