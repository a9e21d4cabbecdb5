use crate::action::Action;
use crate::combine::CombinedReducer;
use crate::dispatcher::Dispatcher;
use crate::error::{Error, Result};
use crate::middleware::Middleware;
use parking_lot::{Mutex, RwLock};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::mpsc::{self, Receiver};

type Subscriber = Box<dyn Fn(&Value) + Send + Sync>;

/// Redux-style Store that holds the aggregate state and dispatches actions
///
/// The Store follows the Redux pattern:
/// - Centralized state, one JSON object keyed by stateName
/// - Actions are dispatched to modify state
/// - The combined reducer handles state transitions
/// - State is replaced (never mutated in place) on each action
///
/// ```text
/// Action → Middleware Chain → CombinedReducer → State → Subscribers
/// ```
pub struct Store {
    reducer: CombinedReducer,
    state: RwLock<Value>,
    middleware: Mutex<Vec<Box<dyn Middleware>>>,
    subscribers: RwLock<Vec<Subscriber>>,
    dispatcher: Dispatcher,
    pending: Mutex<Receiver<Action>>,
}

/// Create a store and seed its state with the `@@redux/INIT` action
pub fn create_store(reducer: CombinedReducer) -> Result<Store> {
    let (action_tx, action_rx) = mpsc::channel();
    let store = Store {
        reducer,
        state: RwLock::new(Value::Null),
        middleware: Mutex::new(Vec::new()),
        subscribers: RwLock::new(Vec::new()),
        dispatcher: Dispatcher::new(action_tx),
        pending: Mutex::new(action_rx),
    };
    store.dispatch(Action::init())?;
    Ok(store)
}

impl Store {
    /// Add middleware after every middleware already installed
    pub fn add_middleware<M: Middleware + 'static>(&mut self, middleware: M) {
        self.middleware.get_mut().push(Box::new(middleware));
    }

    /// Add middleware in front of every middleware already installed
    pub fn wrap_middleware<M: Middleware + 'static>(&mut self, middleware: M) {
        self.middleware.get_mut().insert(0, Box::new(middleware));
    }

    /// Get a copy of the current aggregate state
    pub fn state(&self) -> Value {
        self.state.read().clone()
    }

    /// Read one slice of the state as its typed value
    ///
    /// Returns `Ok(None)` if no slice is stored under `state_name`.
    pub fn slice<T: DeserializeOwned>(&self, state_name: &str) -> Result<Option<T>> {
        let state = self.state.read();
        state
            .get(state_name)
            .map(|value| T::deserialize(value))
            .transpose()
            .map_err(|source| Error::SliceState {
                name: state_name.to_owned(),
                source,
            })
    }

    pub fn reducer(&self) -> &CombinedReducer {
        &self.reducer
    }

    /// Get the dispatcher middleware uses to queue follow-up actions
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Subscribe to state changes
    ///
    /// The callback receives the new state after every reduced action.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.subscribers.write().push(Box::new(callback));
    }

    /// Process an action through middleware chain and reducer
    ///
    /// Reducer errors are returned to the caller and leave the state as it
    /// was. Actions queued by middleware are dispatched afterwards, in order,
    /// unless the action that queued them failed; then they are dropped.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        let should_reduce = {
            let state = self.state.read();
            let mut middleware = self.middleware.lock();
            middleware
                .iter_mut()
                .all(|m| m.handle(&action, &state, &self.dispatcher))
        };

        let reduced = if should_reduce {
            self.reduce(&action)
        } else {
            Ok(())
        };

        let pending: Vec<Action> = self.pending.lock().try_iter().collect();
        if let Err(e) = reduced {
            if !pending.is_empty() {
                log::warn!(
                    "Dropping {} action(s) queued while {} failed",
                    pending.len(),
                    action.kind()
                );
            }
            return Err(e);
        }

        // Process any actions dispatched by middleware
        for action in pending {
            self.dispatch(action)?;
        }
        Ok(())
    }

    fn reduce(&self, action: &Action) -> Result<()> {
        let next = {
            let state = self.state.read();
            self.reducer.reduce(Some(&*state), action)?
        };
        *self.state.write() = next.clone();
        self.notify(&next);
        Ok(())
    }

    /// Replace the entire state (useful for hydration or testing)
    pub fn replace_state(&self, state: Value) {
        *self.state.write() = state.clone();
        self.notify(&state);
    }

    fn notify(&self, state: &Value) {
        for subscriber in self.subscribers.read().iter() {
            subscriber(state);
        }
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("reducer", &self.reducer)
            .field("state", &*self.state.read())
            .field("middleware", &self.middleware.lock().len())
            .finish()
    }
}
