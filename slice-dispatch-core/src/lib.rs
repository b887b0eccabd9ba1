//! Core traits and types for slice-dispatch
//!
//! This crate pairs a state cell with a "sliced reducer": instead of one
//! reducer matching on an action enum, the caller names each action and gives
//! it a handler that turns a payload into a partial-state patch. The library
//! turns those handlers into a dispatch table whose entries shallow-merge the
//! patch into the current state.
//!
//! # Core Concepts
//!
//! - **Merge**: a state record that can absorb a partial version of itself
//! - **Update**: a handler result, either a ready patch or a function of the
//!   previous state producing one
//! - **ReducerSpec**: named handlers, fixed or derived from the current state
//! - **StateCell**: injected container the dispatchers read from and write to
//! - **DispatchTable**: action name to dispatcher, memoized per spec revision
//! - **SlicedReducer**: the slot that seeds the cell and caches the table
//!
//! # Basic Example
//!
//! ```
//! use serde_json::{json, Map, Value};
//! use slice_dispatch_core::prelude::*;
//!
//! let spec = ReducerSpec::from_fn(|state: &Value| {
//!     let todos = state["todos"].as_array().cloned().unwrap_or_default();
//!     Handlers::new().on("addTodo", move |text: String| {
//!         let mut todos = todos.clone();
//!         todos.push(json!({ "text": text }));
//!         let mut patch = Map::new();
//!         patch.insert("todos".into(), Value::Array(todos));
//!         Update::patch(patch)
//!     })
//! });
//!
//! let mut slot: SlicedReducer<Value, String> = SlicedReducer::new();
//! let (state, dispatch) = slot.build(&spec, json!({ "todos": [] }));
//! assert_eq!(state, json!({ "todos": [] }));
//!
//! assert!(dispatch.dispatch("addTodo", "buy milk".into()).unwrap());
//!
//! let (state, _) = slot.build(&spec, json!({ "todos": [] }));
//! assert_eq!(state, json!({ "todos": [{ "text": "buy milk" }] }));
//! ```
//!
//! # Previous-state Updates
//!
//! Handlers that need the state as it is when the dispatch runs return
//! [`Update::with`]. The closure receives the previous state snapshot, not the
//! one the table was built from:
//!
//! ```ignore
//! Handlers::new().on("toggleTodo", |id: u64| {
//!     Update::with(move |prev: &AppState| AppStatePatch::default().todos(toggle(&prev.todos, id)))
//! })
//! ```

pub mod cell;
pub mod config;
pub mod error;
pub mod merge;
pub mod slice;
pub mod spec;
pub mod table;
pub mod testing;
pub mod update;

pub use cell::{LocalCell, StateCell, WatchCell};
pub use config::{glob_match, DispatchLogConfig, Resolution, SliceConfig};
pub use error::{DispatchError, MergeError};
pub use merge::Merge;
pub use slice::SlicedReducer;
pub use spec::{Handler, Handlers, HandlersFn, ReducerSpec, Revision};
pub use table::{DispatchTable, Dispatcher};
pub use update::{PatchFn, Update};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::cell::{LocalCell, StateCell, WatchCell};
    pub use crate::config::{DispatchLogConfig, Resolution, SliceConfig};
    pub use crate::error::{DispatchError, MergeError};
    pub use crate::merge::Merge;
    pub use crate::slice::SlicedReducer;
    pub use crate::spec::{Handlers, ReducerSpec};
    pub use crate::table::{DispatchTable, Dispatcher};
    pub use crate::update::Update;
}
