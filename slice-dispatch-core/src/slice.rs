//! The sliced reducer: state cell plus a memoized dispatch table
//!
//! [`SlicedReducer`] plays the role of a component-local hook slot. Call
//! [`build`](SlicedReducer::build) on every render with the reducer spec and
//! the initial state:
//!
//! - the first call seeds the state cell with `initial`; later calls ignore it
//! - the dispatch table is rebuilt only when the spec's [`Revision`] differs
//!   from the one the cached table was built from, or after
//!   [`invalidate`](SlicedReducer::invalidate)
//!
//! Because a cached table re-resolves handlers against the previous state at
//! dispatch time, a table built once keeps working as the state moves on.
//!
//! # Example
//!
//! ```
//! use serde_json::{json, Map, Value};
//! use slice_dispatch_core::{Handlers, ReducerSpec, SlicedReducer, Update};
//!
//! let spec = ReducerSpec::map(Handlers::new().on("rename", |name: String| {
//!     let mut patch = Map::new();
//!     patch.insert("name".into(), Value::String(name));
//!     Update::patch(patch)
//! }));
//!
//! let mut slot: SlicedReducer<Value, String> = SlicedReducer::new();
//! let (state, dispatch) = slot.build(&spec, json!({ "name": "old", "id": 1 }));
//! assert_eq!(state["name"], "old");
//!
//! dispatch.dispatch("rename", "new".to_string()).unwrap();
//!
//! let (state, _) = slot.build(&spec, json!({ "name": "old", "id": 1 }));
//! assert_eq!(state, json!({ "name": "new", "id": 1 }));
//! ```

use std::fmt;

use crate::cell::{LocalCell, StateCell};
use crate::config::SliceConfig;
use crate::merge::Merge;
use crate::spec::ReducerSpec;
use crate::table::DispatchTable;

/// State cell plus memoized dispatch table
pub struct SlicedReducer<S, P, C = LocalCell<S>>
where
    S: Merge + Clone + 'static,
    P: 'static,
    C: StateCell<S>,
{
    cell: Option<C>,
    config: SliceConfig,
    table: Option<DispatchTable<S, P, C>>,
}

impl<S, P, C> Default for SlicedReducer<S, P, C>
where
    S: Merge + Clone + 'static,
    P: 'static,
    C: StateCell<S>,
{
    fn default() -> Self {
        Self::with_config(SliceConfig::default())
    }
}

impl<S, P, C> SlicedReducer<S, P, C>
where
    S: Merge + Clone + 'static,
    P: 'static,
    C: StateCell<S>,
{
    /// Create an empty slot; the cell is created on the first build
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty slot with the given configuration
    pub fn with_config(config: SliceConfig) -> Self {
        Self {
            cell: None,
            config,
            table: None,
        }
    }

    /// Create a slot over an existing cell.
    ///
    /// The cell is already seeded, so `initial` passed to
    /// [`build`](Self::build) is never used.
    pub fn with_cell(cell: C) -> Self {
        Self {
            cell: Some(cell),
            config: SliceConfig::default(),
            table: None,
        }
    }

    /// Current configuration
    pub fn config(&self) -> &SliceConfig {
        &self.config
    }

    /// Replace the configuration; the next build rebuilds the table
    pub fn set_config(&mut self, config: SliceConfig) {
        self.config = config;
        self.invalidate();
    }

    /// Drop the cached table so the next build rebuilds it
    pub fn invalidate(&mut self) {
        if self.table.take().is_some() {
            tracing::trace!("Dispatch table invalidated");
        }
    }

    /// The state cell, once seeded
    pub fn cell(&self) -> Option<&C> {
        self.cell.as_ref()
    }

    /// Current state, once seeded
    pub fn state(&self) -> Option<S> {
        self.cell.as_ref().map(|cell| cell.get())
    }

    /// Cached dispatch table, if any
    pub fn table(&self) -> Option<&DispatchTable<S, P, C>> {
        self.table.as_ref()
    }

    /// Return the current state and the dispatch table for `spec`
    pub fn build(&mut self, spec: &ReducerSpec<S, P>, initial: S) -> (S, DispatchTable<S, P, C>) {
        let cell = self.cell.get_or_insert_with(|| C::new(initial)).clone();

        let table = match &self.table {
            Some(table) if table.revision() == spec.revision() => table.clone(),
            _ => {
                let table = DispatchTable::build(spec.clone(), cell.clone(), self.config.clone());
                self.table = Some(table.clone());
                table
            }
        };

        (cell.get(), table)
    }
}

impl<S, P, C> fmt::Debug for SlicedReducer<S, P, C>
where
    S: Merge + Clone + 'static,
    P: 'static,
    C: StateCell<S>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlicedReducer")
            .field("seeded", &self.cell.is_some())
            .field("config", &self.config)
            .field("table", &self.table)
            .finish()
    }
}
