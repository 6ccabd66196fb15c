//! Text rendering of store view snapshots.

use std::cell::RefCell;
use std::fmt::Write;
use std::rc::Rc;
use sticky_core::ViewState;

/// Renders one frame: a status line followed by the visible tasks.
pub fn render_view(view: &ViewState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "[{}] {}", view.filter, view.stats);

    if view.stats.total == 0 {
        out.push_str("  no tasks yet\n");
        return out;
    }
    if view.visible.is_empty() {
        let _ = writeln!(out, "  no {} tasks", view.filter);
    }

    for (index, task) in view.visible.iter().enumerate() {
        let marker = if view.selection.as_ref() == Some(&task.id) {
            '>'
        } else {
            ' '
        };
        let check = if task.completed { 'x' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} {:>2}. [{check}] {}  ({})",
            index + 1,
            task.text,
            task.id
        );
    }

    if view.stats.can_clear_completed() {
        out.push_str("  clear-completed available\n");
    }
    out
}

/// Collects rendered frames from store render signals until drained.
#[derive(Debug, Clone, Default)]
pub struct FrameQueue {
    frames: Rc<RefCell<Vec<String>>>,
}

impl FrameQueue {
    pub fn observer(&self) -> impl FnMut(&ViewState) + 'static {
        let frames = Rc::clone(&self.frames);
        move |view: &ViewState| frames.borrow_mut().push(render_view(view))
    }

    pub fn drain(&self) -> Vec<String> {
        self.frames.borrow_mut().drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{render_view, FrameQueue};
    use sticky_core::{Filter, Task, TaskId, TaskStats, ViewState};

    fn task(id: &str, completed: bool) -> Task {
        Task {
            id: TaskId::from(id),
            text: format!("task {id}"),
            completed,
            created_at: 0,
        }
    }

    #[test]
    fn marks_selection_and_completion() {
        let view = ViewState {
            filter: Filter::All,
            selection: Some(TaskId::from("b")),
            visible: vec![task("a", false), task("b", true)],
            stats: TaskStats {
                total: 2,
                completed: 1,
            },
        };

        let frame = render_view(&view);
        let lines = frame.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "[all] 2 tasks (1 completed)");
        assert!(lines[1].starts_with("   1. [ ] task a"));
        assert!(lines[2].starts_with(">  2. [x] task b"));
        assert_eq!(lines[3], "  clear-completed available");
    }

    #[test]
    fn empty_store_renders_placeholder() {
        let view = ViewState {
            filter: Filter::Active,
            selection: None,
            visible: Vec::new(),
            stats: TaskStats::default(),
        };
        assert_eq!(render_view(&view), "[active] 0 tasks\n  no tasks yet\n");
    }

    #[test]
    fn queue_drains_in_order() {
        let queue = FrameQueue::default();
        let mut observer = queue.observer();
        let view = ViewState {
            filter: Filter::Completed,
            selection: None,
            visible: Vec::new(),
            stats: TaskStats::default(),
        };
        observer(&view);
        observer(&view);

        assert_eq!(queue.drain().len(), 2);
        assert!(queue.drain().is_empty());
    }
}
