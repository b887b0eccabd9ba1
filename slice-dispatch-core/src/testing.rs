//! Test utilities for slice-dispatch reducers
//!
//! - [`TestHarness`]: owns a [`SlicedReducer`] over a [`LocalCell`] and
//!   re-renders after every dispatch, tracking table rebuilds
//! - [`CallCounter`]: shared counter for asserting how often a handler ran
//! - [`assert_state!`](crate::assert_state): pattern assertion on a state value
//!
//! # Example
//!
//! ```
//! use serde_json::{json, Map, Value};
//! use slice_dispatch_core::testing::TestHarness;
//! use slice_dispatch_core::{Handlers, ReducerSpec, Update};
//!
//! let spec = ReducerSpec::map(Handlers::new().on("clear", |_: ()| {
//!     let mut patch = Map::new();
//!     patch.insert("items".into(), json!([]));
//!     Update::<Value>::patch(patch)
//! }));
//!
//! let mut harness = TestHarness::new(spec, json!({ "items": [1, 2] }));
//! harness.dispatch("clear", ()).unwrap();
//!
//! assert_eq!(harness.state(), json!({ "items": [] }));
//! assert_eq!(harness.replacements(), 1);
//! ```

use std::cell::Cell;
use std::rc::Rc;

use crate::cell::{LocalCell, StateCell};
use crate::config::SliceConfig;
use crate::error::DispatchError;
use crate::merge::Merge;
use crate::slice::SlicedReducer;
use crate::spec::ReducerSpec;
use crate::table::DispatchTable;

/// Render loop stand-in for a sliced reducer.
///
/// Holds the spec and initial state that would be passed on every render,
/// plus the state and table returned by the last render.
pub struct TestHarness<S, P>
where
    S: Merge + Clone + 'static,
    P: 'static,
{
    reducer: SlicedReducer<S, P>,
    spec: ReducerSpec<S, P>,
    initial: S,
    rendered: S,
    table: DispatchTable<S, P>,
    builds: usize,
}

impl<S, P> TestHarness<S, P>
where
    S: Merge + Clone + 'static,
    P: 'static,
{
    /// Create a harness and perform the first render
    pub fn new(spec: ReducerSpec<S, P>, initial: S) -> Self {
        Self::with_config(spec, initial, SliceConfig::default())
    }

    /// Create a harness with a custom configuration and perform the first render
    pub fn with_config(spec: ReducerSpec<S, P>, initial: S, config: SliceConfig) -> Self {
        let mut reducer = SlicedReducer::with_config(config);
        let (rendered, table) = reducer.build(&spec, initial.clone());
        Self {
            reducer,
            spec,
            initial,
            rendered,
            table,
            builds: 1,
        }
    }

    /// Run another render with the current spec
    pub fn render(&mut self) -> &S {
        let (rendered, table) = self.reducer.build(&self.spec, self.initial.clone());
        if !table.ptr_eq(&self.table) {
            self.builds += 1;
        }
        self.rendered = rendered;
        self.table = table;
        &self.rendered
    }

    /// Swap in a new spec and render
    pub fn set_spec(&mut self, spec: ReducerSpec<S, P>) -> &S {
        self.spec = spec;
        self.render()
    }

    /// Dispatch through the last rendered table, then render again
    pub fn dispatch(&mut self, name: &str, payload: P) -> Result<bool, DispatchError> {
        let result = self.table.dispatch(name, payload);
        self.render();
        result
    }

    /// State as of the last render
    pub fn rendered(&self) -> &S {
        &self.rendered
    }

    /// Current state in the cell
    pub fn state(&self) -> S {
        self.table.cell().get()
    }

    /// Table returned by the last render
    pub fn table(&self) -> &DispatchTable<S, P> {
        &self.table
    }

    /// Number of state replacements so far
    pub fn replacements(&self) -> u64 {
        self.table.cell().version()
    }

    /// Number of distinct tables the renders produced
    pub fn builds(&self) -> usize {
        self.builds
    }

    /// The underlying slot
    pub fn reducer_mut(&mut self) -> &mut SlicedReducer<S, P> {
        &mut self.reducer
    }

    /// Spec passed on each render
    pub fn spec(&self) -> &ReducerSpec<S, P> {
        &self.spec
    }

    /// Cell backing the harness
    pub fn cell(&self) -> &LocalCell<S> {
        self.table.cell()
    }
}

/// Shared invocation counter for closures under test
///
/// ```
/// use slice_dispatch_core::testing::CallCounter;
///
/// let calls = CallCounter::new();
/// let tracked = calls.clone();
/// let f = move || tracked.hit();
/// f();
/// f();
/// assert_eq!(calls.count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Rc<Cell<usize>>);

impl CallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one call
    pub fn hit(&self) {
        self.0.set(self.0.get() + 1);
    }

    pub fn count(&self) -> usize {
        self.0.get()
    }

    pub fn reset(&self) {
        self.0.set(0);
    }
}

/// Assert that a state value matches a pattern.
///
/// # Example
///
/// ```
/// use slice_dispatch_core::assert_state;
///
/// #[derive(Debug)]
/// struct Todo { done: bool }
///
/// let todo = Todo { done: true };
/// assert_state!(todo, Todo { done: true });
/// ```
#[macro_export]
macro_rules! assert_state {
    ($state:expr, $pattern:pat $(if $guard:expr)?) => {
        match &$state {
            state => assert!(
                matches!(state, $pattern $(if $guard)?),
                "Expected state matching `{}`, but got: {:?}",
                stringify!($pattern),
                state
            ),
        }
    };
}
