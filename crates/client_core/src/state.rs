use shared::domain::{Filter, Task, TaskId};

use crate::view::{compute_view, ViewModel};

/// Local change applied after the store confirmed an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch {
    Replace(Vec<Task>),
    Append(Task),
    SetCompleted { id: TaskId, completed: bool },
    Remove(TaskId),
    RemoveCompleted,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskListState {
    tasks: Vec<Task>,
    active_filter: Filter,
}

impl TaskListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn active_filter(&self) -> Filter {
        self.active_filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.active_filter = filter;
    }

    pub fn completed_ids(&self) -> Vec<TaskId> {
        self.tasks
            .iter()
            .filter(|task| task.completed)
            .map(|task| task.id.clone())
            .collect()
    }

    pub fn apply(&mut self, patch: Patch) {
        match patch {
            Patch::Replace(tasks) => self.tasks = tasks,
            Patch::Append(task) => self.tasks.push(task),
            Patch::SetCompleted { id, completed } => {
                if let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) {
                    task.completed = completed;
                }
            }
            Patch::Remove(id) => self.tasks.retain(|task| task.id != id),
            Patch::RemoveCompleted => self.tasks.retain(|task| !task.completed),
        }
    }

    pub fn view(&self) -> ViewModel {
        compute_view(&self.tasks, self.active_filter)
    }
}
