//! Line-driven interactive session.
//!
//! Mirrors the keyboard affordances of the sticky board: `delete-selected`
//! stands in for the Delete key and `escape` for Escape. Task arguments
//! accept either a full id or the 1-based position in the visible list.

use crate::view::FrameQueue;
use log::warn;
use std::io::{self, BufRead, Write};
use sticky_core::{Filter, KeyValueStore, TaskId, TaskStore};

const HELP: &str = "\
commands:
  add <text>          add a task at the top
  toggle <n|id>       flip completed
  delete <n|id>       delete a task
  select <n|id>       select a visible task
  delete-selected     delete the selected task
  escape              clear the selection
  filter <all|active|completed>
  clear-completed     remove completed tasks
  list                redraw
  help | quit
";

/// Runs commands from `input` until EOF or `quit`, writing every frame to `output`.
pub fn run_shell<S: KeyValueStore>(
    store: &mut TaskStore<S>,
    input: impl BufRead,
    mut output: impl Write,
) -> io::Result<()> {
    let frames = FrameQueue::default();
    store.subscribe(frames.observer());
    store.render();
    flush_frames(&frames, &mut output)?;

    for line in input.lines() {
        let line = line?;
        let (command, argument) = split_command(&line);
        if command.is_empty() {
            continue;
        }
        if command == "quit" || command == "exit" {
            break;
        }

        if let Err(message) = dispatch(store, command, argument) {
            writeln!(output, "{message}")?;
        }
        flush_frames(&frames, &mut output)?;
    }
    Ok(())
}

fn dispatch<S: KeyValueStore>(
    store: &mut TaskStore<S>,
    command: &str,
    argument: &str,
) -> Result<(), String> {
    match command {
        "add" => {
            store.add(argument).map_err(persist_error)?;
        }
        "toggle" => {
            let id = resolve_target(store, argument)?;
            store.toggle(&id).map_err(persist_error)?;
        }
        "delete" => {
            let id = resolve_target(store, argument)?;
            store.delete(&id).map_err(persist_error)?;
        }
        "select" => {
            let id = resolve_target(store, argument)?;
            if !store.select(&id).is_changed() {
                return Err(format!("task `{id}` is not visible"));
            }
        }
        "delete-selected" => {
            store.delete_selected().map_err(persist_error)?;
        }
        "escape" => {
            store.clear_selection();
        }
        "filter" => {
            let filter = argument.parse::<Filter>().map_err(|err| err.to_string())?;
            store.set_filter(filter);
        }
        "clear-completed" => {
            store.clear_completed().map_err(persist_error)?;
        }
        "list" => store.render(),
        "help" => return Err(HELP.trim_end().to_string()),
        other => return Err(format!("unknown command `{other}`; try `help`")),
    }
    Ok(())
}

fn split_command(line: &str) -> (&str, &str) {
    let trimmed = line.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    }
}

fn resolve_target<S: KeyValueStore>(store: &TaskStore<S>, argument: &str) -> Result<TaskId, String> {
    if argument.is_empty() {
        return Err("missing task number or id".to_string());
    }
    if let Ok(position) = argument.parse::<usize>() {
        let visible = store.visible_tasks();
        if let Some(task) = position.checked_sub(1).and_then(|index| visible.get(index)) {
            return Ok(task.id.clone());
        }
    }
    Ok(TaskId::from(argument))
}

fn persist_error(err: sticky_core::StoreError) -> String {
    warn!("event=cli_persist module=cli status=error error={err}");
    format!("error: {err}")
}

fn flush_frames(frames: &FrameQueue, output: &mut impl Write) -> io::Result<()> {
    for frame in frames.drain() {
        output.write_all(frame.as_bytes())?;
    }
    output.flush()
}
