//! Type erasure so slices with different state types share one store
//!
//! The aggregate state is a JSON object keyed by stateName; each slice's
//! typed state is converted at the boundary.

use super::{ReducerBase, Slice};
use crate::action::Action;
use crate::error::{Error, Result};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Object-safe view of a [`ReducerBase`]
pub trait SliceReducer: Send {
    fn state_name(&self) -> &str;

    /// Reduce one action against this slice's previous JSON state
    fn reduce(&mut self, state: Option<&Value>, action: &Action) -> Result<Value>;

    /// The cached last state, as JSON
    fn last_state(&self) -> Result<Option<Value>>;

    fn handles(&self, action_type: &str) -> bool;
}

impl<S: Slice> SliceReducer for ReducerBase<S> {
    fn state_name(&self) -> &str {
        ReducerBase::state_name(self)
    }

    fn reduce(&mut self, state: Option<&Value>, action: &Action) -> Result<Value> {
        let old_state = state
            .map(|value| <S::State as Deserialize>::deserialize(value))
            .transpose()
            .map_err(|source| self.state_error(source))?;
        let new_state = self.dispatch(old_state.as_ref(), action)?;
        serde_json::to_value(new_state).map_err(|source| self.state_error(source))
    }

    fn last_state(&self) -> Result<Option<Value>> {
        self.state()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|source| self.state_error(source))
    }

    fn handles(&self, action_type: &str) -> bool {
        ReducerBase::handles(self, action_type)
    }
}

impl<S: Slice> ReducerBase<S> {
    fn state_error(&self, source: serde_json::Error) -> Error {
        Error::SliceState {
            name: self.state_name().to_owned(),
            source,
        }
    }
}

/// A reducer instance shared between the assembler and the store
pub type SharedReducer = Arc<Mutex<Box<dyn SliceReducer>>>;

/// A reducer's dispatch, detached from the instance that owns it
pub type BoundReducer = Arc<dyn Fn(Option<&Value>, &Action) -> Result<Value> + Send + Sync>;

/// Bind a shared reducer's dispatch into a plain function value
pub fn bind(reducer: &SharedReducer) -> BoundReducer {
    let reducer = Arc::clone(reducer);
    Arc::new(move |state: Option<&Value>, action: &Action| reducer.lock().reduce(state, action))
}

/// A reducer "class": builds a fresh reducer instance on demand
#[derive(Clone, Copy)]
pub struct ReducerDef {
    type_name: &'static str,
    build: fn() -> Box<dyn SliceReducer>,
}

impl ReducerDef {
    /// Definition for a slice type constructed with `Default`
    pub fn of<S: Slice + Default>() -> Self {
        Self {
            type_name: std::any::type_name::<S>(),
            build: build_default::<S>,
        }
    }

    /// Instantiate a new reducer from this definition
    pub fn instantiate(&self) -> SharedReducer {
        Arc::new(Mutex::new((self.build)()))
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

fn build_default<S: Slice + Default>() -> Box<dyn SliceReducer> {
    Box::new(ReducerBase::new(S::default()))
}

impl PartialEq for ReducerDef {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
    }
}

impl fmt::Debug for ReducerDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReducerDef").field(&self.type_name).finish()
    }
}
