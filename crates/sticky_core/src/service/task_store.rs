//! Task store and reconciler.
//!
//! # Responsibility
//! - Own the task collection, the active filter and the selection pointer.
//! - Apply each mutation, mirror the collection to the backend, then signal
//!   observers that a render is due.
//!
//! # Invariants
//! - New tasks are prepended; no operation re-sorts the collection.
//! - Selection never reaches a reader or an observer while it references a
//!   task absent from the collection.
//! - Every filter change clears the selection.
//! - Only the collection is persisted, synchronously, once per mutation.
//! - Unknown ids are no-ops: nothing is persisted and no render is signaled.

use crate::model::task::{Filter, Task, TaskId};
use crate::repo::kv_store::KeyValueStore;
use crate::repo::task_repo::{StoreResult, TaskRepository};
use log::{debug, info};
use std::fmt::{Display, Formatter};

/// Outcome of one store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// State changed and observers were notified.
    Changed,
    /// Operation was a no-op.
    Unchanged,
}

impl Transition {
    pub fn is_changed(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Counts derived from the full collection, independent of the filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        Self {
            total: tasks.len(),
            completed: tasks.iter().filter(|task| task.completed).count(),
        }
    }

    /// The "clear completed" affordance is enabled exactly when this is true.
    pub fn can_clear_completed(&self) -> bool {
        self.completed > 0
    }
}

impl Display for TaskStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.total == 0 {
            return write!(f, "0 tasks");
        }
        let plural = if self.total > 1 { "s" } else { "" };
        write!(
            f,
            "{} task{plural} ({} completed)",
            self.total, self.completed
        )
    }
}

/// Snapshot handed to the view layer on every render signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub filter: Filter,
    pub selection: Option<TaskId>,
    /// Tasks matching `filter`, in collection order.
    pub visible: Vec<Task>,
    pub stats: TaskStats,
}

/// Receives render signals after every state transition.
pub trait RenderObserver {
    fn on_render(&mut self, view: &ViewState);
}

impl<F: FnMut(&ViewState)> RenderObserver for F {
    fn on_render(&mut self, view: &ViewState) {
        self(view);
    }
}

/// Single-writer task store. One instance per session.
pub struct TaskStore<S: KeyValueStore> {
    repo: TaskRepository<S>,
    tasks: Vec<Task>,
    filter: Filter,
    selection: Option<TaskId>,
    observers: Vec<Box<dyn RenderObserver>>,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Loads the persisted collection; never fails.
    ///
    /// Filter starts at `All`, selection at none. Call `render` once the view
    /// layer has subscribed to draw the initial state.
    pub fn open(repo: TaskRepository<S>) -> Self {
        let tasks = repo.load_tasks();
        info!("event=store_open module=store status=ok count={}", tasks.len());
        Self {
            repo,
            tasks,
            filter: Filter::All,
            selection: None,
            observers: Vec::new(),
        }
    }

    pub fn repository(&self) -> &TaskRepository<S> {
        &self.repo
    }

    /// Registers a render observer.
    pub fn subscribe(&mut self, observer: impl RenderObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Prepends a task built from `text`. Blank text is a no-op.
    pub fn add(&mut self, text: &str) -> StoreResult<Transition> {
        let task = match Task::new(text) {
            Ok(task) => task,
            Err(err) => {
                debug!("event=task_add module=store status=skipped reason={err}");
                return Ok(Transition::Unchanged);
            }
        };

        info!("event=task_add module=store status=ok id={}", task.id);
        self.tasks.insert(0, task);
        self.commit()
    }

    /// Flips completion of the task with `id`.
    pub fn toggle(&mut self, id: &TaskId) -> StoreResult<Transition> {
        let Some(task) = self.tasks.iter_mut().find(|task| &task.id == id) else {
            debug!("event=task_toggle module=store status=skipped reason=unknown_id");
            return Ok(Transition::Unchanged);
        };

        task.toggle();
        info!(
            "event=task_toggle module=store status=ok id={} completed={}",
            task.id, task.completed
        );
        self.commit()
    }

    /// Removes the task with `id`, clearing the selection if it pointed there.
    pub fn delete(&mut self, id: &TaskId) -> StoreResult<Transition> {
        let Some(index) = self.position(id) else {
            debug!("event=task_delete module=store status=skipped reason=unknown_id");
            return Ok(Transition::Unchanged);
        };

        self.tasks.remove(index);
        if self.selection.as_ref() == Some(id) {
            self.selection = None;
        }
        info!("event=task_delete module=store status=ok id={id}");
        self.commit()
    }

    /// Removes every completed task.
    pub fn clear_completed(&mut self) -> StoreResult<Transition> {
        let before = self.tasks.len();
        self.tasks.retain(|task| !task.completed);
        let removed = before - self.tasks.len();
        if removed == 0 {
            debug!("event=tasks_clear_completed module=store status=skipped reason=none_completed");
            return Ok(Transition::Unchanged);
        }

        self.reconcile_selection();
        info!("event=tasks_clear_completed module=store status=ok removed={removed}");
        self.commit()
    }

    /// Sets the filter and clears the selection, even if the filter is unchanged.
    pub fn set_filter(&mut self, filter: Filter) -> Transition {
        self.filter = filter;
        self.selection = None;
        debug!("event=filter_set module=store status=ok filter={filter}");
        self.render();
        Transition::Changed
    }

    /// Selects a task that exists and is visible under the current filter.
    pub fn select(&mut self, id: &TaskId) -> Transition {
        let visible = self
            .tasks
            .iter()
            .any(|task| &task.id == id && self.filter.matches(task));
        if !visible {
            debug!("event=task_select module=store status=skipped reason=not_visible");
            return Transition::Unchanged;
        }

        self.selection = Some(id.clone());
        self.render();
        Transition::Changed
    }

    /// Deletes the selected task, if any.
    pub fn delete_selected(&mut self) -> StoreResult<Transition> {
        self.reconcile_selection();
        match self.selection.clone() {
            Some(id) => self.delete(&id),
            None => Ok(Transition::Unchanged),
        }
    }

    pub fn clear_selection(&mut self) -> Transition {
        self.selection = None;
        self.render();
        Transition::Changed
    }

    /// Full collection in stored order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// Current selection; a stale id reads as none.
    pub fn selection(&self) -> Option<&TaskId> {
        self.selection
            .as_ref()
            .filter(|id| self.position(id).is_some())
    }

    /// Tasks matching the current filter, in collection order.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| self.filter.matches(task))
            .collect()
    }

    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(&self.tasks)
    }

    /// Reconciles the selection, then snapshots everything a view needs.
    pub fn view(&mut self) -> ViewState {
        self.reconcile_selection();
        ViewState {
            filter: self.filter,
            selection: self.selection.clone(),
            visible: self.visible_tasks().into_iter().cloned().collect(),
            stats: self.stats(),
        }
    }

    /// Signals every observer with a fresh view.
    pub fn render(&mut self) {
        if self.observers.is_empty() {
            self.reconcile_selection();
            return;
        }
        let view = self.view();
        for observer in &mut self.observers {
            observer.on_render(&view);
        }
    }

    fn commit(&mut self) -> StoreResult<Transition> {
        self.repo.save_tasks(&self.tasks)?;
        self.render();
        Ok(Transition::Changed)
    }

    fn reconcile_selection(&mut self) {
        let dangling = self
            .selection
            .as_ref()
            .is_some_and(|id| self.position(id).is_none());
        if dangling {
            debug!("event=selection_reconcile module=store status=cleared");
            self.selection = None;
        }
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| &task.id == id)
    }
}
