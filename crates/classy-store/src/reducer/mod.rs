//! Reducers defined as types with one handler per action
//!
//! Instead of a single `match` over every action, a slice implements
//! [`Slice`] and registers one handler per action type:
//!
//! ```rust
//! use classy_store::{Action, Handlers, Reduction, Slice};
//!
//! #[derive(Default)]
//! struct Counter;
//!
//! impl Slice for Counter {
//!     type State = i64;
//!
//!     fn state_name(&self) -> &str {
//!         "counter"
//!     }
//!
//!     fn register(handlers: &mut Handlers<Self>) {
//!         handlers
//!             .on("INCREMENT", |_, _, count, _| Some(*count + 1))
//!             .on("DECREMENT", Self::decrement);
//!     }
//! }
//!
//! impl Counter {
//!     fn decrement(&mut self, _: &Action, count: &mut i64, _: &mut Reduction) -> Option<i64> {
//!         *count -= 1;
//!         None
//!     }
//! }
//! ```
//!
//! ## Dispatch
//!
//! ```text
//! clone(old) → @@redux? → resolve handler → beforeAction → handler → afterAction
//! ```
//!
//! Every hook sees the working state produced by its predecessor and may
//! either mutate it in place or return a replacement.

mod base;
mod erased;

pub use base::ReducerBase;
pub use erased::{bind, BoundReducer, ReducerDef, SharedReducer, SliceReducer};

use crate::action::{handler_name, Action};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Action handler: `(slice, action, working state, reduction) -> replacement`
///
/// Returning `None` keeps the (possibly mutated) working state.
pub type Handler<S> = fn(
    &mut S,
    &Action,
    &mut <S as Slice>::State,
    &mut Reduction,
) -> Option<<S as Slice>::State>;

/// A slice of the aggregate state and the handlers that transform it
pub trait Slice: Send + Sized + 'static {
    type State: Clone + Default + Serialize + DeserializeOwned + Send + 'static;

    /// Key of this slice in the aggregate state. Must not be empty.
    fn state_name(&self) -> &str;

    /// Register one handler per action type this slice understands
    fn register(handlers: &mut Handlers<Self>);

    /// Seed state used when the store has no previous value for this slice
    fn initial_state(&self) -> Self::State {
        Self::State::default()
    }

    /// Called once after the handler table has been built
    fn build(&mut self) {}

    /// Produce the independent working copy a dispatch starts from
    fn clone_state(&self, state: &Self::State) -> Self::State {
        state.clone()
    }

    /// Runs before the action handler
    fn before_action(
        &mut self,
        _action: &Action,
        _state: &mut Self::State,
        _reduction: &mut Reduction,
    ) -> Option<Self::State> {
        None
    }

    /// Runs after the action handler
    fn after_action(
        &mut self,
        _action: &Action,
        _state: &mut Self::State,
        _reduction: &mut Reduction,
    ) -> Option<Self::State> {
        None
    }
}

/// Registration table from handler name to handler
pub struct Handlers<S: Slice> {
    table: HashMap<String, Handler<S>>,
}

impl<S: Slice> Handlers<S> {
    pub(crate) fn new() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Register `handler` for `action_type`
    ///
    /// The type is stored under its handler name, so `"ADD_TODO"` and
    /// `"addTodo"` register the same entry.
    pub fn on(&mut self, action_type: &str, handler: Handler<S>) -> &mut Self {
        self.table.insert(handler_name(action_type), handler);
        self
    }

    pub(crate) fn resolve(&self, action_type: &str) -> Option<Handler<S>> {
        self.table.get(&handler_name(action_type)).copied()
    }

    /// Registered handler names, sorted
    pub fn handled(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.table.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Scratch data shared by the hooks of a single dispatch
///
/// A fresh, empty reduction is created for every dispatch that finds a
/// handler; nothing survives into the next one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reduction {
    data: Map<String, Value>,
}

impl Reduction {
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.data.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }
}
