//! Reducer specs: named handlers, either fixed or derived from state
//!
//! A [`ReducerSpec`] describes which actions exist and how each one turns a
//! payload into an [`Update`]. It comes in two forms:
//!
//! - [`ReducerSpec::map`]: a fixed [`Handlers`] mapping
//! - [`ReducerSpec::from_fn`]: a function of the current state returning the
//!   mapping, so handlers can close over the state they were created from
//!
//! Each spec carries a [`Revision`]. Clones share it; every constructor call
//! and every [`ReducerSpec::touch`] allocates a new one. Dispatch tables are
//! memoized on the revision alone.

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::merge::Merge;
use crate::update::Update;

/// A per-action handler
pub type Handler<S, P> = Rc<dyn Fn(P) -> Update<S>>;

/// Reducer function form: current state in, handler mapping out
pub type HandlersFn<S, P> = Rc<dyn Fn(&S) -> Handlers<S, P>>;

/// Identity token for a reducer spec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Revision(u64);

impl Revision {
    /// Allocate a revision no other spec in this process holds
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Revision(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw counter value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Ordered mapping of action name to handler
///
/// Names keep insertion order. Registering a name twice replaces the
/// handler but keeps the original position.
pub struct Handlers<S: Merge, P> {
    entries: Vec<(String, Handler<S, P>)>,
}

impl<S: Merge, P> Clone for Handlers<S, P> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<S: Merge, P> Default for Handlers<S, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Merge, P> Handlers<S, P> {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn on<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(P) -> Update<S> + 'static,
    {
        self.insert(name, handler);
        self
    }

    /// Register a handler under `name`
    pub fn insert<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(P) -> Update<S> + 'static,
    {
        let name = name.into();
        let handler: Handler<S, P> = Rc::new(handler);
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = handler,
            None => self.entries.push((name, handler)),
        }
    }

    /// Look up a handler by name
    pub fn get(&self, name: &str) -> Option<&Handler<S, P>> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, handler)| handler)
    }

    /// Returns true if a handler is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Action names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Iterate over `(name, handler)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Handler<S, P>)> {
        self.entries.iter().map(|(n, h)| (n.as_str(), h))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Merge, P> fmt::Debug for Handlers<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

enum Source<S: Merge, P> {
    Map(Handlers<S, P>),
    Fn(HandlersFn<S, P>),
}

/// Description of the available actions and their handlers
///
/// # Example
///
/// ```
/// use serde_json::{json, Map, Value};
/// use slice_dispatch_core::{Handlers, ReducerSpec, Update};
///
/// let spec = ReducerSpec::from_fn(|state: &Value| {
///     let todos = state["todos"].as_array().cloned().unwrap_or_default();
///     Handlers::new().on("addTodo", move |text: String| {
///         let mut todos = todos.clone();
///         todos.push(json!({ "text": text }));
///         let mut patch = Map::new();
///         patch.insert("todos".into(), Value::Array(todos));
///         Update::patch(patch)
///     })
/// });
///
/// let handlers = spec.resolve(&json!({ "todos": [] }));
/// assert!(handlers.contains("addTodo"));
/// ```
pub struct ReducerSpec<S: Merge, P> {
    source: Rc<Source<S, P>>,
    revision: Revision,
}

impl<S: Merge, P> Clone for ReducerSpec<S, P> {
    fn clone(&self) -> Self {
        Self {
            source: Rc::clone(&self.source),
            revision: self.revision,
        }
    }
}

impl<S: Merge, P> ReducerSpec<S, P> {
    /// A spec with a fixed handler mapping
    pub fn map(handlers: Handlers<S, P>) -> Self {
        Self {
            source: Rc::new(Source::Map(handlers)),
            revision: Revision::next(),
        }
    }

    /// A spec whose handler mapping is derived from the current state
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&S) -> Handlers<S, P> + 'static,
    {
        Self {
            source: Rc::new(Source::Fn(Rc::new(f))),
            revision: Revision::next(),
        }
    }

    /// Identity of this spec
    pub fn revision(&self) -> Revision {
        self.revision
    }

    /// Mark the spec as changed so dependent tables get rebuilt
    pub fn touch(&mut self) {
        self.revision = Revision::next();
    }

    /// Returns true for the state-derived form
    pub fn is_fn(&self) -> bool {
        matches!(*self.source, Source::Fn(_))
    }

    /// Handler mapping as seen from `state`.
    ///
    /// The fixed form borrows its mapping; the function form is invoked once.
    pub fn resolve(&self, state: &S) -> Cow<'_, Handlers<S, P>> {
        match &*self.source {
            Source::Map(handlers) => Cow::Borrowed(handlers),
            Source::Fn(f) => Cow::Owned(f(state)),
        }
    }

    /// Resolve a single handler by name as seen from `state`
    pub fn handler(&self, name: &str, state: &S) -> Option<Handler<S, P>> {
        self.resolve(state).get(name).cloned()
    }
}

impl<S: Merge, P> From<Handlers<S, P>> for ReducerSpec<S, P> {
    fn from(handlers: Handlers<S, P>) -> Self {
        ReducerSpec::map(handlers)
    }
}

impl<S: Merge, P> fmt::Debug for ReducerSpec<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("ReducerSpec");
        match &*self.source {
            Source::Map(handlers) => out.field("map", handlers),
            Source::Fn(_) => out.field("map", &"fn(&S) -> Handlers"),
        };
        out.field("revision", &self.revision).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};
    use std::cell::Cell;

    fn noop() -> impl Fn(()) -> Update<Value> {
        |_| Update::none()
    }

    #[test]
    fn test_handlers_keep_insertion_order() {
        let handlers = Handlers::<Value, ()>::new()
            .on("b", noop())
            .on("a", noop())
            .on("c", noop());

        let names: Vec<_> = handlers.names().collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(handlers.len(), 3);
    }

    #[test]
    fn test_handlers_replace_keeps_position() {
        let mut handlers = Handlers::<Value, ()>::new().on("a", noop()).on("b", noop());
        handlers.insert("a", |_| {
            let mut patch = Map::new();
            patch.insert("replaced".into(), json!(true));
            Update::patch(patch)
        });

        let names: Vec<_> = handlers.names().collect();
        assert_eq!(names, vec!["a", "b"]);

        let update = (handlers.get("a").unwrap())(());
        let next = update.apply(&json!({})).unwrap();
        assert_eq!(next["replaced"], true);
    }

    #[test]
    fn test_revision_shared_by_clones() {
        let spec = ReducerSpec::map(Handlers::<Value, ()>::new());
        let clone = spec.clone();
        assert_eq!(spec.revision(), clone.revision());

        let other = ReducerSpec::map(Handlers::<Value, ()>::new());
        assert_ne!(spec.revision(), other.revision());
    }

    #[test]
    fn test_touch_changes_revision() {
        let mut spec = ReducerSpec::map(Handlers::<Value, ()>::new());
        let before = spec.revision();
        spec.touch();
        assert_ne!(before, spec.revision());
        assert!(spec.revision() > before);
    }

    #[test]
    fn test_map_resolve_borrows() {
        let spec = ReducerSpec::map(Handlers::<Value, ()>::new().on("a", noop()));
        assert!(!spec.is_fn());
        assert!(matches!(spec.resolve(&json!({})), Cow::Borrowed(_)));
    }

    #[test]
    fn test_fn_resolve_sees_state() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let spec = ReducerSpec::from_fn(move |state: &Value| {
            counter.set(counter.get() + 1);
            let mut handlers = Handlers::<Value, ()>::new();
            if state["admin"] == true {
                handlers.insert("reset", |_| Update::none());
            }
            handlers
        });

        assert!(spec.is_fn());
        assert!(spec.handler("reset", &json!({ "admin": true })).is_some());
        assert!(spec.handler("reset", &json!({ "admin": false })).is_none());
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_debug_lists_names() {
        let spec = ReducerSpec::map(Handlers::<Value, ()>::new().on("addTodo", noop()));
        let out = format!("{:?}", spec);
        assert!(out.contains("addTodo"));
    }
}
