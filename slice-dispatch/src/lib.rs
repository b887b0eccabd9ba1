//! slice-dispatch: sliced reducers for local state
//!
//! Name each action, give it a handler that returns a partial-state patch,
//! and get back a dispatch table whose entries shallow-merge those patches
//! into the state.
//!
//! # Example
//! ```ignore
//! use slice_dispatch::prelude::*;
//!
//! #[derive(Merge, Clone, Debug, Default)]
//! struct AppState {
//!     input_text: String,
//!     todos: Vec<String>,
//! }
//!
//! let spec = ReducerSpec::map(
//!     Handlers::new()
//!         .on("setInputText", |text: String| {
//!             Update::patch(AppStatePatch::default().input_text(text))
//!         })
//!         .on("addTodo", |text: String| {
//!             Update::with(move |prev: &AppState| {
//!                 let mut todos = prev.todos.clone();
//!                 todos.push(text);
//!                 AppStatePatch::default().todos(todos)
//!             })
//!         }),
//! );
//!
//! let mut slot: SlicedReducer<AppState, String> = SlicedReducer::new();
//! let (state, dispatch) = slot.build(&spec, AppState::default());
//! dispatch.dispatch("addTodo", "buy milk".into())?;
//! ```

// Re-export everything from core
pub use slice_dispatch_core::*;

// Re-export derive macros
pub use slice_dispatch_macros::Merge;

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use slice_dispatch_core::{Merge, StateCell};

    // Specs and updates
    pub use slice_dispatch_core::{Handlers, ReducerSpec, Update};

    // Cells
    pub use slice_dispatch_core::{LocalCell, WatchCell};

    // Dispatch
    pub use slice_dispatch_core::{
        DispatchError, DispatchLogConfig, DispatchTable, Dispatcher, MergeError, Resolution,
        SliceConfig, SlicedReducer,
    };

    // Derive macros
    pub use slice_dispatch_macros::Merge;
}
