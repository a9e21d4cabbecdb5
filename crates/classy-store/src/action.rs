//! Actions and the naming convention that maps them to handlers
//!
//! An action is a `type` identifier plus arbitrary payload fields, serialized
//! flat just like a Redux action:
//!
//! ```text
//! {"type": "ADD_TODO", "text": "write docs"}
//! ```
//!
//! Action types use UPPER_SNAKE_CASE; handlers are keyed by the lowerCamelCase
//! form of the type (`ADD_TODO` -> `addTodo`). Store-internal actions carry a
//! `@@redux` prefix and never reach a handler.

use heck::ToLowerCamelCase;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Prefix reserved for actions generated by the store itself
pub const INTERNAL_ACTION_PREFIX: &str = "@@redux";

/// Action dispatched once when a store is created
pub const INIT_ACTION: &str = "@@redux/INIT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    kind: String,
    #[serde(flatten)]
    payload: Map<String, Value>,
}

impl Action {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: Map::new(),
        }
    }

    /// The store's own initialization action
    pub fn init() -> Self {
        Self::new(INIT_ACTION)
    }

    /// Add a payload field
    ///
    /// # Example
    ///
    /// ```rust
    /// use classy_store::Action;
    ///
    /// let action = Action::new("ADD_TODO").with("text", "write docs");
    /// assert_eq!(action.field::<String>("text").as_deref(), Some("write docs"));
    /// ```
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// The action type identifier
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// Read a payload field as `T`; None if it is missing or has another shape
    pub fn field<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| T::deserialize(v).ok())
    }

    /// Whether the store generated this action for its own bookkeeping
    pub fn is_internal(&self) -> bool {
        self.kind.starts_with(INTERNAL_ACTION_PREFIX)
    }

    /// The handler key this action resolves to
    pub fn handler_name(&self) -> String {
        handler_name(&self.kind)
    }
}

/// Convert an action type into the name of the handler for it.
///
/// Neither the `@@` marker nor the `/` separator of store-internal types can
/// appear in a handler name, so `@@` is dropped and `/` becomes a word break:
/// `@@redux/INIT` -> `reduxInit`, `SOME_ACTION` -> `someAction`.
pub fn handler_name(action_type: &str) -> String {
    match action_type.strip_prefix("@@") {
        Some(rest) => rest.replacen('/', "_", 1).to_lower_camel_case(),
        None => action_type.to_lower_camel_case(),
    }
}
