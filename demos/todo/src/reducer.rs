//! Todo reducer spec
//!
//! Handlers are resolved from the state, as a component would write them:
//! `addTodo` takes the next id from the state it was resolved against, the
//! rest compute their patch from the previous state at dispatch time.

use slice_dispatch::{Handlers, ReducerSpec, Update};

use crate::state::{AppState, AppStatePatch, Todo};

/// Payload shared by all todo actions
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Id(u64),
    None,
}

pub fn reducer() -> ReducerSpec<AppState, Payload> {
    ReducerSpec::from_fn(|state: &AppState| {
        let next_id = state.next_id;

        Handlers::new()
            .on("addTodo", move |payload: Payload| match payload {
                Payload::Text(text) => Update::with(move |prev: &AppState| {
                    let mut todos = prev.todos.clone();
                    todos.push(Todo {
                        id: next_id,
                        text,
                        done: false,
                    });
                    AppStatePatch::default()
                        .todos(todos)
                        .next_id(next_id + 1)
                        .input_text(String::new())
                }),
                _ => Update::none(),
            })
            .on("toggleTodo", |payload: Payload| match payload {
                Payload::Id(id) => Update::with(move |prev: &AppState| {
                    let todos = prev
                        .todos
                        .iter()
                        .map(|t| Todo {
                            done: if t.id == id { !t.done } else { t.done },
                            ..t.clone()
                        })
                        .collect::<Vec<_>>();
                    AppStatePatch::default().todos(todos)
                }),
                _ => Update::none(),
            })
            .on("removeTodo", |payload: Payload| match payload {
                Payload::Id(id) => Update::with(move |prev: &AppState| {
                    let todos = prev
                        .todos
                        .iter()
                        .filter(|t| t.id != id)
                        .cloned()
                        .collect::<Vec<_>>();
                    AppStatePatch::default().todos(todos)
                }),
                _ => Update::none(),
            })
            .on("setInputText", |payload: Payload| match payload {
                Payload::Text(text) => Update::patch(AppStatePatch::default().input_text(text)),
                _ => Update::none(),
            })
            .on("clearDone", |_: Payload| {
                Update::with(|prev: &AppState| {
                    let todos = prev
                        .todos
                        .iter()
                        .filter(|t| !t.done)
                        .cloned()
                        .collect::<Vec<_>>();
                    AppStatePatch::default().todos(todos)
                })
            })
    })
}
