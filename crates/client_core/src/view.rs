//! Pure projection from task state to what a surface displays.

use shared::domain::{Filter, Task, TaskId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FooterView {
    pub visible: bool,
    pub summary: String,
    pub active_count: usize,
    pub completed_count: usize,
    pub show_clear_completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewModel {
    pub filter: Filter,
    pub rows: Vec<RowView>,
    pub footer: FooterView,
}

impl ViewModel {
    /// Row at a 1-based position in the visible list.
    pub fn row(&self, position: usize) -> Option<&RowView> {
        position.checked_sub(1).and_then(|index| self.rows.get(index))
    }
}

pub fn compute_view(tasks: &[Task], filter: Filter) -> ViewModel {
    let mut visible: Vec<&Task> = tasks.iter().filter(|task| filter.matches(task)).collect();
    visible.sort_by_key(|task| task.created_at);

    let completed_count = tasks.iter().filter(|task| task.completed).count();
    let active_count = tasks.len() - completed_count;

    ViewModel {
        filter,
        rows: visible
            .into_iter()
            .map(|task| RowView {
                id: task.id.clone(),
                title: task.title.clone(),
                completed: task.completed,
            })
            .collect(),
        footer: FooterView {
            visible: !tasks.is_empty(),
            summary: items_left_label(active_count),
            active_count,
            completed_count,
            show_clear_completed: completed_count > 0,
        },
    }
}

pub fn items_left_label(count: usize) -> String {
    if count == 1 {
        "1 item left".to_string()
    } else {
        format!("{count} items left")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::{TimeZone, Utc};

    use super::*;

    fn task(id: i64, title: &str, completed: bool, minute: u32) -> Task {
        Task {
            id: TaskId::from(id),
            title: title.to_string(),
            completed,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, minute, 0).unwrap(),
        }
    }

    fn ids(view: &ViewModel) -> HashSet<TaskId> {
        view.rows.iter().map(|row| row.id.clone()).collect()
    }

    fn sample() -> Vec<Task> {
        vec![
            task(1, "Buy milk", false, 0),
            task(2, "Walk dog", true, 5),
            task(3, "Pay rent", false, 10),
            task(4, "Call mum", true, 15),
        ]
    }

    #[test]
    fn active_and_completed_partition_all() {
        let tasks = sample();
        let all = ids(&compute_view(&tasks, Filter::All));
        let active = ids(&compute_view(&tasks, Filter::Active));
        let completed = ids(&compute_view(&tasks, Filter::Completed));

        assert!(active.is_disjoint(&completed));
        let union: HashSet<TaskId> = active.union(&completed).cloned().collect();
        assert_eq!(union, all);
        assert_eq!(all.len(), tasks.len());
    }

    #[test]
    fn counts_cover_unfiltered_tasks_under_every_filter() {
        let tasks = sample();
        for filter in Filter::ALL {
            let view = compute_view(&tasks, filter);
            assert_eq!(view.footer.active_count, 2);
            assert_eq!(view.footer.completed_count, 2);
            assert_eq!(
                view.footer.active_count + view.footer.completed_count,
                tasks.len()
            );
            assert!(view.footer.show_clear_completed);
        }
    }

    #[test]
    fn rows_follow_creation_order() {
        let tasks = vec![
            task(9, "later", false, 30),
            task(8, "earlier", false, 1),
        ];
        let view = compute_view(&tasks, Filter::All);
        let titles: Vec<&str> = view.rows.iter().map(|row| row.title.as_str()).collect();
        assert_eq!(titles, ["earlier", "later"]);
    }

    #[test]
    fn empty_list_hides_footer() {
        let view = compute_view(&[], Filter::All);
        assert!(view.rows.is_empty());
        assert!(!view.footer.visible);
        assert!(!view.footer.show_clear_completed);
    }

    #[test]
    fn footer_stays_visible_when_filter_hides_every_row() {
        let tasks = vec![task(1, "Buy milk", false, 0)];
        let view = compute_view(&tasks, Filter::Completed);
        assert!(view.rows.is_empty());
        assert!(view.footer.visible);
        assert!(!view.footer.show_clear_completed);
        assert_eq!(view.footer.summary, "1 item left");
    }

    #[test]
    fn summary_pluralizes() {
        assert_eq!(items_left_label(0), "0 items left");
        assert_eq!(items_left_label(1), "1 item left");
        assert_eq!(items_left_label(2), "2 items left");
    }

    #[test]
    fn computing_twice_is_stable() {
        let tasks = sample();
        assert_eq!(
            compute_view(&tasks, Filter::Active),
            compute_view(&tasks, Filter::Active)
        );
    }

    #[test]
    fn row_lookup_is_one_based() {
        let view = compute_view(&sample(), Filter::All);
        assert_eq!(view.row(1).map(|row| row.title.as_str()), Some("Buy milk"));
        assert!(view.row(0).is_none());
        assert!(view.row(5).is_none());
    }
}
