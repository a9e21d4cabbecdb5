use super::{Handlers, Reduction, Slice};
use crate::action::Action;
use crate::error::{Error, Result};

/// Runs a [`Slice`]'s handlers for incoming actions
///
/// Holds the slice, its seed state and key, the handler table built at
/// construction, and a copy of the last state it produced. That copy is a
/// convenience only: the store owns the authoritative state.
pub struct ReducerBase<S: Slice> {
    slice: S,
    initial_state: S::State,
    state_name: String,
    handlers: Handlers<S>,
    state: Option<S::State>,
}

impl<S: Slice> ReducerBase<S> {
    pub fn new(mut slice: S) -> Self {
        let initial_state = slice.initial_state();
        let state_name = slice.state_name().to_owned();

        let mut handlers = Handlers::new();
        S::register(&mut handlers);
        slice.build();

        Self {
            slice,
            initial_state,
            state_name,
            handlers,
            state: None,
        }
    }

    /// Replace the seed state taken from the slice
    pub fn with_initial_state(mut self, initial_state: S::State) -> Self {
        self.initial_state = initial_state;
        self
    }

    /// Replace the key taken from the slice
    pub fn with_state_name(mut self, state_name: impl Into<String>) -> Self {
        self.state_name = state_name.into();
        self
    }

    /// Reduce `action` against `old_state` (or the initial state if None)
    ///
    /// Store-internal (`@@redux`) actions return an untouched copy of the
    /// state without running any hook. Every other action must have a
    /// registered handler, otherwise this fails with
    /// [`Error::UnhandledActionType`].
    pub fn dispatch(&mut self, old_state: Option<&S::State>, action: &Action) -> Result<S::State> {
        let old_state = old_state.unwrap_or(&self.initial_state);
        let mut state = self.slice.clone_state(old_state);

        if action.is_internal() {
            return Ok(state);
        }

        let handler = self
            .handlers
            .resolve(action.kind())
            .ok_or_else(|| Error::UnhandledActionType(action.kind().to_owned()))?;

        let mut reduction = Reduction::default();

        if let Some(next) = self.slice.before_action(action, &mut state, &mut reduction) {
            state = next;
        }
        if let Some(next) = handler(&mut self.slice, action, &mut state, &mut reduction) {
            state = next;
        }
        if let Some(next) = self.slice.after_action(action, &mut state, &mut reduction) {
            state = next;
        }

        self.state = Some(state.clone());
        Ok(state)
    }

    /// The last state produced by a handled dispatch
    pub fn state(&self) -> Option<&S::State> {
        self.state.as_ref()
    }

    pub fn initial_state(&self) -> &S::State {
        &self.initial_state
    }

    pub fn state_name(&self) -> &str {
        &self.state_name
    }

    pub fn slice(&self) -> &S {
        &self.slice
    }

    /// Whether a handler is registered for `action_type`
    pub fn handles(&self, action_type: &str) -> bool {
        self.handlers.resolve(action_type).is_some()
    }

    pub fn handlers(&self) -> &Handlers<S> {
        &self.handlers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    /// Records every hook call and can be told what each hook returns
    #[derive(Default)]
    struct Recorder {
        calls: Vec<(&'static str, Value)>,
        before: Option<Value>,
        handler: Option<Value>,
        after: Option<Value>,
        built: bool,
        reductions_seen: Vec<bool>,
    }

    impl Slice for Recorder {
        type State = Value;

        fn state_name(&self) -> &str {
            "recorder"
        }

        fn register(handlers: &mut Handlers<Self>) {
            handlers.on("SOME_ACTION", Self::some_action);
        }

        fn initial_state(&self) -> Value {
            json!({"seed": true})
        }

        fn build(&mut self) {
            self.built = true;
        }

        fn before_action(
            &mut self,
            _action: &Action,
            state: &mut Value,
            reduction: &mut Reduction,
        ) -> Option<Value> {
            self.calls.push(("before", state.clone()));
            self.reductions_seen.push(reduction.is_empty());
            reduction.insert("leftover", true);
            self.before.clone()
        }

        fn after_action(
            &mut self,
            _action: &Action,
            state: &mut Value,
            _reduction: &mut Reduction,
        ) -> Option<Value> {
            self.calls.push(("after", state.clone()));
            self.after.clone()
        }
    }

    impl Recorder {
        fn some_action(
            &mut self,
            _action: &Action,
            state: &mut Value,
            reduction: &mut Reduction,
        ) -> Option<Value> {
            assert_eq!(reduction.get("leftover"), Some(&Value::Bool(true)));
            self.calls.push(("handler", state.clone()));
            self.handler.clone()
        }
    }

    fn names(reducer: &ReducerBase<Recorder>) -> Vec<&'static str> {
        reducer.slice().calls.iter().map(|(name, _)| *name).collect()
    }

    #[test]
    fn test_new_builds_slice() {
        let reducer = ReducerBase::new(Recorder::default());
        assert!(reducer.slice().built);
        assert_eq!(reducer.state_name(), "recorder");
        assert_eq!(reducer.initial_state(), &json!({"seed": true}));
        assert!(reducer.state().is_none());
        assert!(reducer.handles("SOME_ACTION"));
        assert!(!reducer.handles("OTHER_ACTION"));
    }

    #[test]
    fn test_overrides() {
        let reducer = ReducerBase::new(Recorder::default())
            .with_initial_state(json!([]))
            .with_state_name("renamed");
        assert_eq!(reducer.state_name(), "renamed");
        assert_eq!(reducer.initial_state(), &json!([]));
    }

    #[test]
    fn test_clone_is_independent() {
        let reducer = ReducerBase::new(Recorder::default());
        let original = json!({"a": 1, "b": {"c": 2}});

        let mut clone = reducer.slice().clone_state(&original);
        clone.as_object_mut().unwrap().remove("a");
        clone["b"]["c"] = json!(3);
        clone["d"] = json!("foo");

        assert_eq!(original, json!({"a": 1, "b": {"c": 2}}));
    }

    #[test]
    fn test_internal_action_returns_clone_without_hooks() {
        let mut reducer = ReducerBase::new(Recorder::default());
        let old = json!({"a": {"b": 1}});

        let new = reducer.dispatch(Some(&old), &Action::init()).unwrap();

        assert_eq!(new, old);
        assert!(reducer.slice().calls.is_empty());
        // Only handled dispatches refresh the cached state
        assert!(reducer.state().is_none());
    }

    #[test]
    fn test_internal_action_uses_clone_hook() {
        struct Marker;

        impl Slice for Marker {
            type State = String;

            fn state_name(&self) -> &str {
                "marker"
            }

            fn register(_handlers: &mut Handlers<Self>) {}

            fn clone_state(&self, _state: &String) -> String {
                "foo".to_string()
            }
        }

        let mut reducer = ReducerBase::new(Marker);
        let state = reducer
            .dispatch(Some(&"bar".to_string()), &Action::new("@@redux/INIT"))
            .unwrap();
        assert_eq!(state, "foo");
    }

    #[test]
    fn test_missing_state_defaults_to_initial_state() {
        let mut reducer = ReducerBase::new(Recorder::default());
        let state = reducer.dispatch(None, &Action::init()).unwrap();
        assert_eq!(state, json!({"seed": true}));
    }

    #[test]
    fn test_unhandled_action_fails_with_its_type() {
        let mut reducer = ReducerBase::new(Recorder::default());

        let err = reducer.dispatch(Some(&json!({})), &Action::new("FOO")).unwrap_err();
        assert!(matches!(&err, Error::UnhandledActionType(kind) if kind == "FOO"));
        assert!(err.to_string().contains("Invalid action type"));
        assert!(err.to_string().contains("FOO"));

        let err = reducer.dispatch(Some(&json!({})), &Action::new("foo")).unwrap_err();
        assert!(err.to_string().contains("foo"));
        assert!(reducer.slice().calls.is_empty());
    }

    #[test]
    fn test_at_init_is_not_internal() {
        let mut reducer = ReducerBase::new(Recorder::default());
        let err = reducer.dispatch(None, &Action::new("@@INIT")).unwrap_err();
        assert!(matches!(err, Error::UnhandledActionType(kind) if kind == "@@INIT"));
    }

    #[test]
    fn test_hooks_run_in_order_on_predecessor_state() {
        let mut reducer = ReducerBase::new(Recorder {
            before: Some(json!({"a": 1})),
            handler: Some(json!({"a": 2})),
            after: Some(json!({"a": 3})),
            ..Recorder::default()
        });

        let state = reducer
            .dispatch(Some(&json!({"a": 0})), &Action::new("SOME_ACTION"))
            .unwrap();

        assert_eq!(state, json!({"a": 3}));
        assert_eq!(reducer.state(), Some(&json!({"a": 3})));
        assert_eq!(
            reducer.slice().calls,
            vec![
                ("before", json!({"a": 0})),
                ("handler", json!({"a": 1})),
                ("after", json!({"a": 2})),
            ]
        );
    }

    #[test]
    fn test_hook_without_replacement_carries_state_forward() {
        let mut reducer = ReducerBase::new(Recorder {
            before: Some(json!("new state")),
            ..Recorder::default()
        });
        let state = reducer.dispatch(Some(&json!({})), &Action::new("SOME_ACTION")).unwrap();
        assert_eq!(state, json!("new state"));
        assert_eq!(reducer.state(), Some(&json!("new state")));

        let mut reducer = ReducerBase::new(Recorder {
            handler: Some(json!("new state")),
            ..Recorder::default()
        });
        let state = reducer.dispatch(Some(&json!({})), &Action::new("SOME_ACTION")).unwrap();
        assert_eq!(state, json!("new state"));

        let mut reducer = ReducerBase::new(Recorder {
            after: Some(json!("new state")),
            ..Recorder::default()
        });
        let state = reducer.dispatch(Some(&json!({})), &Action::new("SOME_ACTION")).unwrap();
        assert_eq!(state, json!("new state"));
        assert_eq!(names(&reducer), vec!["before", "handler", "after"]);
    }

    #[test]
    fn test_reduction_starts_empty_every_dispatch() {
        let mut reducer = ReducerBase::new(Recorder::default());

        reducer.dispatch(None, &Action::new("SOME_ACTION")).unwrap();
        reducer.dispatch(None, &Action::new("SOME_ACTION")).unwrap();

        // before_action leaves data behind every time, yet always starts empty
        assert_eq!(reducer.slice().reductions_seen, vec![true, true]);
    }

    #[test]
    fn test_handler_can_mutate_in_place() {
        #[derive(Default)]
        struct Counter;

        impl Slice for Counter {
            type State = i64;

            fn state_name(&self) -> &str {
                "counter"
            }

            fn register(handlers: &mut Handlers<Self>) {
                handlers.on("INCREMENT", |_, action, count, _| {
                    *count += action.field::<i64>("by").unwrap_or(1);
                    None
                });
            }
        }

        let mut reducer = ReducerBase::new(Counter);
        let one = reducer.dispatch(None, &Action::new("INCREMENT")).unwrap();
        let three = reducer
            .dispatch(Some(&one), &Action::new("INCREMENT").with("by", 2))
            .unwrap();

        assert_eq!(one, 1);
        assert_eq!(three, 3);
        assert_eq!(reducer.state(), Some(&3));
    }
}
