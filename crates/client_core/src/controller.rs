//! Write-through task list controller.
//!
//! Each operation issues one store call and patches local state only once the
//! call succeeded. The state lock is never held across a store call, so
//! overlapping operations apply their patches in completion order.

use std::sync::Arc;

use shared::{
    domain::{Filter, Task, TaskId},
    error::StoreError,
};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{
    render::RenderSurface,
    state::{Patch, TaskListState},
    store::TaskStore,
    view::ViewModel,
};

const LOAD_FAILED: &str = "Could not load tasks";
const ADD_FAILED: &str = "Could not add task";
const UPDATE_FAILED: &str = "Could not update task";
const DELETE_FAILED: &str = "Could not delete task";
const CLEAR_FAILED: &str = "Could not clear completed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Unconfigured,
    EmptyTitle,
    NothingToClear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Skipped(SkipReason),
    Failed(StoreError),
}

struct ControllerInner<R> {
    state: TaskListState,
    surface: R,
    last_view: ViewModel,
}

impl<R: RenderSurface> ControllerInner<R> {
    fn render(&mut self) {
        self.last_view = self.state.view();
        self.surface.render(&self.last_view);
    }

    fn commit(&mut self, patch: Patch) -> Outcome {
        self.state.apply(patch);
        self.render();
        Outcome::Applied
    }

    fn fail(&mut self, context: &str, err: StoreError) -> Outcome {
        warn!(error = %err, "{}", context);
        self.surface
            .show_error(&format!("{context}: {}", err.message()));
        Outcome::Failed(err)
    }
}

pub struct ViewController<R: RenderSurface> {
    store: Option<Arc<dyn TaskStore>>,
    inner: Mutex<ControllerInner<R>>,
}

impl<R: RenderSurface> ViewController<R> {
    pub fn new(store: Arc<dyn TaskStore>, surface: R) -> Self {
        Self::with_store(Some(store), surface)
    }

    /// Controller for a session without a usable store: every operation is
    /// skipped and the notice stays on the surface.
    pub fn unconfigured(mut surface: R, notice: &str) -> Self {
        surface.show_notice(notice);
        Self::with_store(None, surface)
    }

    fn with_store(store: Option<Arc<dyn TaskStore>>, surface: R) -> Self {
        let state = TaskListState::new();
        let last_view = state.view();
        Self {
            store,
            inner: Mutex::new(ControllerInner {
                state,
                surface,
                last_view,
            }),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    pub async fn view(&self) -> ViewModel {
        self.inner.lock().await.last_view.clone()
    }

    pub async fn tasks(&self) -> Vec<Task> {
        self.inner.lock().await.state.tasks().to_vec()
    }

    pub async fn active_filter(&self) -> Filter {
        self.inner.lock().await.state.active_filter()
    }

    /// Runs `f` against the surface, e.g. to redraw or inspect it.
    pub async fn with_surface<T>(&self, f: impl FnOnce(&mut R) -> T) -> T {
        f(&mut self.inner.lock().await.surface)
    }

    async fn begin(&self) -> Option<Arc<dyn TaskStore>> {
        let store = self.store.clone()?;
        self.inner.lock().await.surface.clear_error();
        Some(store)
    }

    pub async fn load_all(&self) -> Outcome {
        let Some(store) = self.store.clone() else {
            return Outcome::Skipped(SkipReason::Unconfigured);
        };
        {
            let mut inner = self.inner.lock().await;
            inner.surface.clear_error();
            inner.surface.set_loading(true);
        }

        let result = store.list().await;

        let mut inner = self.inner.lock().await;
        inner.surface.set_loading(false);
        match result {
            Ok(tasks) => {
                info!(count = tasks.len(), "loaded tasks");
                inner.commit(Patch::Replace(tasks))
            }
            Err(err) => inner.fail(LOAD_FAILED, err),
        }
    }

    pub async fn add(&self, title: &str) -> Outcome {
        let title = title.trim();
        if title.is_empty() {
            return Outcome::Skipped(SkipReason::EmptyTitle);
        }
        let Some(store) = self.begin().await else {
            return Outcome::Skipped(SkipReason::Unconfigured);
        };

        let result = store.create(title).await;

        let mut inner = self.inner.lock().await;
        match result {
            Ok(task) => {
                info!(task_id = %task.id, "added task");
                inner.commit(Patch::Append(task))
            }
            Err(err) => inner.fail(ADD_FAILED, err),
        }
    }

    pub async fn toggle(&self, id: &TaskId, completed: bool) -> Outcome {
        let Some(store) = self.begin().await else {
            return Outcome::Skipped(SkipReason::Unconfigured);
        };

        let result = store.set_completed(id, completed).await;

        let mut inner = self.inner.lock().await;
        match result {
            Ok(()) => {
                info!(task_id = %id, completed, "updated task");
                inner.commit(Patch::SetCompleted {
                    id: id.clone(),
                    completed,
                })
            }
            Err(err) => inner.fail(UPDATE_FAILED, err),
        }
    }

    pub async fn delete(&self, id: &TaskId) -> Outcome {
        let Some(store) = self.begin().await else {
            return Outcome::Skipped(SkipReason::Unconfigured);
        };

        let result = store.remove(id).await;

        let mut inner = self.inner.lock().await;
        match result {
            Ok(()) => {
                info!(task_id = %id, "deleted task");
                inner.commit(Patch::Remove(id.clone()))
            }
            Err(err) => inner.fail(DELETE_FAILED, err),
        }
    }

    pub async fn clear_completed(&self) -> Outcome {
        let Some(store) = self.begin().await else {
            return Outcome::Skipped(SkipReason::Unconfigured);
        };
        let ids = self.inner.lock().await.state.completed_ids();
        if ids.is_empty() {
            return Outcome::Skipped(SkipReason::NothingToClear);
        }

        let result = store.remove_many(&ids).await;

        let mut inner = self.inner.lock().await;
        match result {
            Ok(()) => {
                info!(count = ids.len(), "cleared completed tasks");
                inner.commit(Patch::RemoveCompleted)
            }
            Err(err) => inner.fail(CLEAR_FAILED, err),
        }
    }

    pub async fn set_filter(&self, filter: Filter) {
        let mut inner = self.inner.lock().await;
        inner.state.set_filter(filter);
        inner.render();
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
