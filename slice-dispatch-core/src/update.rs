//! Handler results
//!
//! A handler either knows its patch up front or needs the previous state to
//! compute it. [`Update`] makes that choice explicit so the dispatcher can
//! pattern match on it instead of probing the result at runtime.

use std::fmt;

use crate::error::MergeError;
use crate::merge::Merge;

/// Deferred patch computation, fed the previous state snapshot
pub type PatchFn<S> = Box<dyn FnOnce(&S) -> <S as Merge>::Patch>;

/// The result of calling a handler with a payload
pub enum Update<S: Merge> {
    /// A ready partial record
    Patch(S::Patch),
    /// A function of the previous state producing the partial record
    PatchFn(PatchFn<S>),
}

impl<S: Merge> Update<S> {
    /// Wrap a ready patch
    #[inline]
    pub fn patch(patch: S::Patch) -> Self {
        Update::Patch(patch)
    }

    /// Defer the patch until the previous state is known
    #[inline]
    pub fn with<F>(f: F) -> Self
    where
        F: FnOnce(&S) -> S::Patch + 'static,
    {
        Update::PatchFn(Box::new(f))
    }

    /// An empty patch; merging it keeps every field
    #[inline]
    pub fn none() -> Self {
        Update::Patch(S::Patch::default())
    }

    /// Returns true if the patch depends on the previous state
    #[inline]
    pub fn is_deferred(&self) -> bool {
        matches!(self, Update::PatchFn(_))
    }

    /// Turn this update into a concrete patch.
    ///
    /// A deferred patch function is called exactly once, with `prev`.
    pub fn resolve(self, prev: &S) -> S::Patch {
        match self {
            Update::Patch(patch) => patch,
            Update::PatchFn(f) => f(prev),
        }
    }

    /// Resolve against `prev` and merge the result into a new state
    pub fn apply(self, prev: &S) -> Result<S, MergeError> {
        let patch = self.resolve(prev);
        prev.merge(patch)
    }
}

impl<S> fmt::Debug for Update<S>
where
    S: Merge,
    S::Patch: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Update::Patch(patch) => f.debug_tuple("Patch").field(patch).finish(),
            Update::PatchFn(_) => f.write_str("PatchFn(..)"),
        }
    }
}
