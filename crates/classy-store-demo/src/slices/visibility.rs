use classy_store::{Action, Handlers, Reduction, Slice};
use serde::{Deserialize, Serialize};

use super::todos::TODO_ACTIONS;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    #[default]
    ShowAll,
    ShowActive,
    ShowCompleted,
}

/// Which todos are shown, stored under `visibilityFilter`
#[derive(Debug, Default)]
pub struct VisibilitySlice;

impl Slice for VisibilitySlice {
    type State = Visibility;

    fn state_name(&self) -> &str {
        "visibilityFilter"
    }

    fn register(handlers: &mut Handlers<Self>) {
        handlers.on("SET_VISIBILITY_FILTER", Self::set_visibility_filter);

        // Todo list actions reach this slice too but never change the filter
        for kind in TODO_ACTIONS {
            handlers.on(kind, |_, _, _, _| None);
        }
    }
}

impl VisibilitySlice {
    fn set_visibility_filter(
        &mut self,
        action: &Action,
        _state: &mut Visibility,
        _reduction: &mut Reduction,
    ) -> Option<Visibility> {
        // An unrecognised filter leaves the current one in place
        action.field::<Visibility>("filter")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classy_store::ReducerBase;

    #[test]
    fn test_set_visibility_filter() {
        let mut reducer = ReducerBase::new(VisibilitySlice);

        let state = reducer
            .dispatch(None, &Action::new("SET_VISIBILITY_FILTER").with("filter", "SHOW_COMPLETED"))
            .unwrap();
        assert_eq!(state, Visibility::ShowCompleted);

        let state = reducer
            .dispatch(Some(&state), &Action::new("SET_VISIBILITY_FILTER").with("filter", "bogus"))
            .unwrap();
        assert_eq!(state, Visibility::ShowCompleted);
    }

    #[test]
    fn test_todo_actions_keep_the_filter() {
        let mut reducer = ReducerBase::new(VisibilitySlice);
        let state = reducer
            .dispatch(None, &Action::new("SET_VISIBILITY_FILTER").with("filter", "SHOW_ACTIVE"))
            .unwrap();

        for kind in TODO_ACTIONS {
            assert!(reducer.handles(kind));
            let next = reducer.dispatch(Some(&state), &Action::new(*kind)).unwrap();
            assert_eq!(next, Visibility::ShowActive);
        }
    }

    #[test]
    fn test_initial_state() {
        let mut reducer = ReducerBase::new(VisibilitySlice);
        assert_eq!(reducer.dispatch(None, &Action::init()).unwrap(), Visibility::ShowAll);
    }
}
