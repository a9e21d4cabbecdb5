//! Middleware and store enhancers
//!
//! An [`Enhancer`] wraps the store constructor; [`compose`] folds many of
//! them into one. [`apply_middleware`] turns a [`Middleware`] into an
//! enhancer that installs it on every store it creates.
//!
//! ```text
//! compose([a, b])(create_store) == a(b(create_store))
//! Action → a → b → Reducer → State
//! ```

mod logging;

pub use logging::LoggingMiddleware;

use crate::action::Action;
use crate::combine::CombinedReducer;
use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::store::Store;
use serde_json::Value;
use std::sync::Arc;

/// Middleware trait - intercepts actions before they reach the reducer
pub trait Middleware: Send {
    /// Handle an action
    ///
    /// - `action`: The action to process
    /// - `state`: Current aggregate state (read-only)
    /// - `dispatcher`: Use to queue follow-up actions
    ///
    /// Returns `true` to continue chain, `false` to consume action
    fn handle(&mut self, action: &Action, state: &Value, dispatcher: &Dispatcher) -> bool;
}

/// Builds a store from a combined reducer
pub type StoreCreator = Arc<dyn Fn(CombinedReducer) -> Result<Store> + Send + Sync>;

/// Wraps a store constructor to add behaviour to the stores it builds
pub type Enhancer = Arc<dyn Fn(StoreCreator) -> StoreCreator + Send + Sync>;

/// Compose enhancers right to left; the first one ends up outermost
pub fn compose(enhancers: &[Enhancer]) -> Enhancer {
    let enhancers = enhancers.to_vec();
    Arc::new(move |create: StoreCreator| {
        enhancers
            .iter()
            .rev()
            .fold(create, |inner, enhancer| enhancer(inner))
    })
}

/// Enhancer installing a clone of `middleware` on each store it creates
///
/// The middleware runs before any middleware installed by enhancers nested
/// inside this one.
pub fn apply_middleware<M>(middleware: M) -> Enhancer
where
    M: Middleware + Clone + Sync + 'static,
{
    Arc::new(move |create: StoreCreator| -> StoreCreator {
        let middleware = middleware.clone();
        Arc::new(move |reducer: CombinedReducer| -> Result<Store> {
            let mut store = create(reducer)?;
            store.wrap_middleware(middleware.clone());
            Ok(store)
        })
    })
}
