//! Todo list state

use serde::Serialize;
use slice_dispatch::Merge;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Todo {
    pub id: u64,
    pub text: String,
    pub done: bool,
}

#[derive(Merge, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub input_text: String,
    pub todos: Vec<Todo>,
    pub next_id: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            input_text: String::new(),
            todos: Vec::new(),
            next_id: 1,
        }
    }
}
