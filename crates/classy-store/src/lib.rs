//! # classy-store
//!
//! Define each slice of application state as a type with one handler per
//! action, then assemble those types and some middleware into a store.
//!
//! ## Reducers
//!
//! - [`Slice`] - a state slice: its key, its state type, its handlers and
//!   optional `before_action`/`after_action` hooks
//! - [`ReducerBase`] - resolves an action to its handler by naming convention
//!   (`ADD_TODO` → `addTodo`) and runs the hooks around it
//!
//! ## Assembly
//!
//! - [`StoreAssembler`] - instantiates reducer definitions, maps them by
//!   stateName, combines them and composes middleware into a lazily built
//!   [`Store`]
//!
//! ## Store primitives
//!
//! - [`combine_reducers`], [`compose`], [`create_store`] and
//!   [`apply_middleware`] - the minimal Redux-style building blocks the
//!   assembler delegates to

pub mod action;
pub mod assembler;
pub mod combine;
pub mod dispatcher;
pub mod error;
pub mod middleware;
pub mod reducer;
pub mod store;

pub use action::{handler_name, Action, INIT_ACTION, INTERNAL_ACTION_PREFIX};
pub use assembler::{Part, StoreAssembler};
pub use combine::{combine_reducers, CombinedReducer};
pub use dispatcher::Dispatcher;
pub use error::{Error, Result};
pub use middleware::{apply_middleware, compose, Enhancer, LoggingMiddleware, Middleware, StoreCreator};
pub use reducer::{
    bind, BoundReducer, Handler, Handlers, Reduction, ReducerBase, ReducerDef, SharedReducer, Slice,
    SliceReducer,
};
pub use store::{create_store, Store};

// Re-exported so callers can configure assembly without a direct dependency
pub use classy_store_config::{DuplicatePolicy, StoreConfig};
