//! Scoped sub-state wrapper.

/// Whether a screen's sub-state is currently meaningful.
///
/// `OutOfScope` is not an error: it means the UI is not navigated to the
/// screen that owns this sub-state. Consumers treat it as "do nothing".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopedState<T> {
    InScope(T),
    OutOfScope,
}

impl<T> ScopedState<T> {
    /// Returns `true` when the sub-state is meaningful.
    pub fn is_in_scope(&self) -> bool {
        matches!(self, Self::InScope(_))
    }

    /// Returns `true` when the owning screen is not shown.
    pub fn is_out_of_scope(&self) -> bool {
        matches!(self, Self::OutOfScope)
    }

    /// Borrow the scoped value without consuming it.
    pub fn as_ref(&self) -> ScopedState<&T> {
        match self {
            Self::InScope(value) => ScopedState::InScope(value),
            Self::OutOfScope => ScopedState::OutOfScope,
        }
    }

    /// Transform the scoped value, keeping `OutOfScope` as is.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ScopedState<U> {
        match self {
            Self::InScope(value) => ScopedState::InScope(f(value)),
            Self::OutOfScope => ScopedState::OutOfScope,
        }
    }

    /// Chain a guarded extraction. An out-of-scope parent short-circuits
    /// without calling `f`.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> ScopedState<U>) -> ScopedState<U> {
        match self {
            Self::InScope(value) => f(value),
            Self::OutOfScope => ScopedState::OutOfScope,
        }
    }

    /// Converts into `Option<T>`, discarding the scope marker.
    pub fn in_scope(self) -> Option<T> {
        match self {
            Self::InScope(value) => Some(value),
            Self::OutOfScope => None,
        }
    }
}

impl<T: Clone> ScopedState<&T> {
    /// Clone the borrowed scoped value.
    pub fn cloned(self) -> ScopedState<T> {
        self.map(Clone::clone)
    }
}

impl<T> From<Option<T>> for ScopedState<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::InScope(value),
            None => Self::OutOfScope,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_then_short_circuits_out_of_scope() {
        let state: ScopedState<u32> = ScopedState::OutOfScope;
        let chained = state.and_then(|_| -> ScopedState<u32> {
            panic!("guard must not run for an out-of-scope parent")
        });
        assert!(chained.is_out_of_scope());
    }

    #[test]
    fn and_then_applies_guard_in_scope() {
        let state = ScopedState::InScope(4u32);
        assert_eq!(state.and_then(|v| ScopedState::InScope(v * 2)), ScopedState::InScope(8));
        assert_eq!(
            state.and_then(|_| ScopedState::<u32>::OutOfScope),
            ScopedState::OutOfScope
        );
    }

    #[test]
    fn option_conversion() {
        assert_eq!(ScopedState::from(Some("a")), ScopedState::InScope("a"));
        assert_eq!(ScopedState::<&str>::from(None), ScopedState::OutOfScope);
        assert_eq!(ScopedState::InScope(1).in_scope(), Some(1));
        assert_eq!(ScopedState::<i32>::OutOfScope.in_scope(), None);
    }
}
