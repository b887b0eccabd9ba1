//! Dispatch tables
//!
//! A [`DispatchTable`] maps each action name of a [`ReducerSpec`] to a
//! [`Dispatcher`]. Dispatching performs exactly one state replacement on the
//! table's cell:
//!
//! 1. Read the previous state from the cell
//! 2. Find the handler (see [`Resolution`])
//! 3. Call it with the payload to get an [`Update`](crate::Update)
//! 4. Resolve the update against the previous state and shallow-merge it
//! 5. Write the merged state back
//!
//! The handler and any deferred patch function run once per dispatch. If any
//! step fails the cell is left untouched.

use std::fmt;
use std::rc::Rc;

use crate::cell::{LocalCell, StateCell};
use crate::config::{Resolution, SliceConfig};
use crate::error::DispatchError;
use crate::merge::Merge;
use crate::spec::{Handlers, ReducerSpec, Revision};

struct TableInner<S: Merge, P, C> {
    spec: ReducerSpec<S, P>,
    cell: C,
    config: SliceConfig,
    /// Handler mapping as resolved when the table was built
    captured: Handlers<S, P>,
}

/// Mapping from action name to dispatcher
///
/// Cloning is cheap and preserves identity, see [`ptr_eq`](Self::ptr_eq).
pub struct DispatchTable<S: Merge, P, C = LocalCell<S>> {
    inner: Rc<TableInner<S, P, C>>,
}

impl<S: Merge, P, C> Clone for DispatchTable<S, P, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S, P, C> DispatchTable<S, P, C>
where
    S: Merge + Clone + 'static,
    P: 'static,
    C: StateCell<S>,
{
    /// Build a table for `spec` over `cell`.
    ///
    /// The action set is taken from the spec as seen from the cell's current
    /// state.
    pub fn build(spec: ReducerSpec<S, P>, cell: C, config: SliceConfig) -> Self {
        let state = cell.get();
        let captured = spec.resolve(&state).into_owned();

        tracing::trace!(
            revision = %spec.revision(),
            actions = captured.len(),
            resolution = config.resolution.name(),
            "Dispatch table built"
        );

        Self {
            inner: Rc::new(TableInner {
                spec,
                cell,
                config,
                captured,
            }),
        }
    }

    /// Dispatch `payload` to the action called `name`
    pub fn dispatch(&self, name: &str, payload: P) -> Result<bool, DispatchError> {
        match self.get(name) {
            Some(dispatcher) => dispatcher.dispatch(payload),
            None => {
                tracing::warn!(action = %name, "Dispatch to unknown action");
                Err(DispatchError::UnknownAction(name.to_string()))
            }
        }
    }

    /// Get the dispatcher for `name`
    pub fn get(&self, name: &str) -> Option<Dispatcher<S, P, C>> {
        self.inner
            .captured
            .names()
            .position(|n| n == name)
            .map(|index| Dispatcher {
                table: self.clone(),
                index,
            })
    }

    /// All dispatchers, in the spec's key order
    pub fn dispatchers(&self) -> impl Iterator<Item = Dispatcher<S, P, C>> + '_ {
        (0..self.len()).map(move |index| Dispatcher {
            table: self.clone(),
            index,
        })
    }

    fn run(&self, index: usize, payload: P) -> Result<bool, DispatchError> {
        let inner = &*self.inner;
        let Some((name, captured)) = inner.captured.iter().nth(index) else {
            return Err(DispatchError::UnknownAction(index.to_string()));
        };
        let log = inner.config.log.should_log(name);

        if log {
            tracing::trace!(action = %name, "Dispatching action");
        }

        let result = inner.cell.try_update(|prev: &S| -> Result<S, DispatchError> {
            let handler = match inner.config.resolution {
                Resolution::Captured => Rc::clone(captured),
                Resolution::Rebind => inner
                    .spec
                    .handler(name, prev)
                    .ok_or_else(|| DispatchError::MissingHandler(name.to_string()))?,
            };
            let update = handler(payload);
            Ok(update.apply(prev)?)
        });

        match result {
            Ok(()) => {
                if log {
                    tracing::debug!(
                        action = %name,
                        version = inner.cell.version(),
                        "Action dispatched"
                    );
                }
                Ok(true)
            }
            Err(e) => {
                if log {
                    tracing::warn!(action = %name, error = %e, "Dispatch failed");
                }
                Err(e)
            }
        }
    }
}

impl<S: Merge, P, C> DispatchTable<S, P, C> {
    /// Action names, in the spec's key order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inner.captured.names()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.inner.captured.contains(name)
    }

    pub fn len(&self) -> usize {
        self.inner.captured.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.captured.is_empty()
    }

    /// Revision of the spec this table was built from
    pub fn revision(&self) -> Revision {
        self.inner.spec.revision()
    }

    /// Configuration the table was built with
    pub fn config(&self) -> &SliceConfig {
        &self.inner.config
    }

    /// The cell this table writes to
    pub fn cell(&self) -> &C {
        &self.inner.cell
    }

    /// Returns true if both handles refer to the same table
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<S: Merge, P, C> fmt::Debug for DispatchTable<S, P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchTable")
            .field("actions", &self.inner.captured)
            .field("revision", &self.revision())
            .field("resolution", &self.inner.config.resolution)
            .finish()
    }
}

/// Callable entry of a [`DispatchTable`]
pub struct Dispatcher<S: Merge, P, C = LocalCell<S>> {
    table: DispatchTable<S, P, C>,
    index: usize,
}

impl<S: Merge, P, C> Clone for Dispatcher<S, P, C> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            index: self.index,
        }
    }
}

impl<S: Merge, P, C> Dispatcher<S, P, C> {
    /// Action name this dispatcher triggers
    pub fn name(&self) -> &str {
        self.table
            .inner
            .captured
            .names()
            .nth(self.index)
            .unwrap_or_default()
    }
}

impl<S, P, C> Dispatcher<S, P, C>
where
    S: Merge + Clone + 'static,
    P: 'static,
    C: StateCell<S>,
{
    /// Trigger one state replacement.
    ///
    /// Returns `Ok(true)`: the state was replaced and a re-render is due.
    pub fn dispatch(&self, payload: P) -> Result<bool, DispatchError> {
        self.table.run(self.index, payload)
    }
}

impl<S: Merge, P, C> fmt::Debug for Dispatcher<S, P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Dispatcher").field(&self.name()).finish()
    }
}
