//! State transition contract.

/// A pure, total state transition.
///
/// `reduce` must not perform side effects and must accept every action,
/// returning the state unchanged for actions outside its domain. Composite
/// reducers delegate each action to the sub-reducer owning its domain and
/// leave the other sub-states untouched.
pub trait Reducer {
    /// State owned by this reducer.
    type State: Clone;
    /// Actions this reducer understands.
    type Action;

    /// Apply one action.
    fn reduce(state: Self::State, action: &Self::Action) -> Self::State;
}
