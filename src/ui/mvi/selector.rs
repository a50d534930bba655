//! Selector composition over nested state trees.

use std::fmt;
use std::sync::Arc;

use super::scope::ScopedState;

type SelectFn<S, T> = dyn Fn(&S) -> ScopedState<T> + Send + Sync;

/// Pure, total projection from a root state `S` to a scoped sub-state `T`.
///
/// Selectors never fail: a root state that does not contain the requested
/// sub-state yields [`ScopedState::OutOfScope`]. The same input always
/// yields the same output.
///
/// Deep hierarchies are built by chaining single-arm guards with
/// [`Selector::then`]; see the [`arm!`](crate::arm) macro for the usual
/// match-or-default guard.
pub struct Selector<S, T> {
    select: Arc<SelectFn<S, T>>,
}

impl<S, T> Clone for Selector<S, T> {
    fn clone(&self) -> Self {
        Self {
            select: Arc::clone(&self.select),
        }
    }
}

impl<S, T> fmt::Debug for Selector<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selector")
            .field("from", &std::any::type_name::<S>())
            .field("to", &std::any::type_name::<T>())
            .finish()
    }
}

impl<S: 'static, T: 'static> Selector<S, T> {
    pub fn new(select: impl Fn(&S) -> ScopedState<T> + Send + Sync + 'static) -> Self {
        Self {
            select: Arc::new(select),
        }
    }

    pub fn select(&self, state: &S) -> ScopedState<T> {
        (self.select)(state)
    }

    /// Compose with a guarded extraction into the next nested sub-state.
    ///
    /// ```text
    /// select(state) = match parent(state) {
    ///     OutOfScope  => OutOfScope,
    ///     InScope(s)  => guard(s),
    /// }
    /// ```
    pub fn then<U: 'static>(
        &self,
        guard: impl Fn(&T) -> ScopedState<U> + Send + Sync + 'static,
    ) -> Selector<S, U> {
        let parent = self.clone();
        Selector::new(move |state: &S| match parent.select(state) {
            ScopedState::InScope(scoped) => guard(&scoped),
            ScopedState::OutOfScope => ScopedState::OutOfScope,
        })
    }

    /// Project a facet that exists on every value of `T`.
    ///
    /// The result is in scope whenever the parent is.
    pub fn map<U: 'static>(&self, facet: impl Fn(&T) -> U + Send + Sync + 'static) -> Selector<S, U> {
        self.then(move |scoped| ScopedState::InScope(facet(scoped)))
    }
}

impl<S: Clone + 'static> Selector<S, S> {
    /// The root selector: every state is in scope as itself.
    pub fn identity() -> Self {
        Selector::new(|state: &S| ScopedState::InScope(state.clone()))
    }
}

/// Build a match-or-default guard for [`Selector::then`].
///
/// The guard returns `InScope(expr)` when the pattern matches and
/// `OutOfScope` for every other arm.
///
/// ```ignore
/// let dropoff = pick_me_up.then(arm!(
///     PickMeUpViewControllerState { state: PickMeUpState::SelectDropoffLocation(picker), .. }
///         => picker.clone()
/// ));
/// ```
#[macro_export]
macro_rules! arm {
    ($pattern:pat => $extract:expr) => {
        move |state: &_| {
            #[allow(unreachable_patterns)]
            match state {
                $pattern => $crate::ui::mvi::ScopedState::InScope($extract),
                _ => $crate::ui::mvi::ScopedState::OutOfScope,
            }
        }
    };
}
