//! Assemble reducer types and middleware into a store
//!
//! ```rust
//! use classy_store::{apply_middleware, Action, Handlers, LoggingMiddleware, ReducerDef, Slice, StoreAssembler};
//!
//! #[derive(Default)]
//! struct Todos;
//!
//! impl Slice for Todos {
//!     type State = Vec<String>;
//!
//!     fn state_name(&self) -> &str {
//!         "todos"
//!     }
//!
//!     fn register(handlers: &mut Handlers<Self>) {
//!         handlers.on("ADD_TODO", |_, action, todos, _| {
//!             todos.extend(action.field::<String>("text"));
//!             None
//!         });
//!     }
//! }
//!
//! let assembler = StoreAssembler::new(
//!     vec![ReducerDef::of::<Todos>()],
//!     vec![apply_middleware(LoggingMiddleware::new())],
//! )?;
//! let store = assembler.store()?;
//! store.dispatch(Action::new("ADD_TODO").with("text", "write docs"))?;
//! assert_eq!(store.slice::<Vec<String>>("todos")?, Some(vec!["write docs".to_string()]));
//! # Ok::<(), classy_store::Error>(())
//! ```

use crate::combine::{combine_reducers, CombinedReducer};
use crate::error::{Error, Result};
use crate::middleware::{compose, Enhancer, StoreCreator};
use crate::reducer::{bind, BoundReducer, ReducerDef, SharedReducer};
use crate::store::{create_store, Store};
use classy_store_config::{DuplicatePolicy, StoreConfig};
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::sync::{Arc, OnceLock};

/// One input to [`StoreAssembler::from_parts`]
#[derive(Clone)]
pub enum Part {
    Reducer(ReducerDef),
    Middleware(Enhancer),
}

impl From<ReducerDef> for Part {
    fn from(def: ReducerDef) -> Self {
        Part::Reducer(def)
    }
}

impl From<Enhancer> for Part {
    fn from(enhancer: Enhancer) -> Self {
        Part::Middleware(enhancer)
    }
}

/// Builds a store from reducer definitions and middleware
///
/// The reducer instances, the stateName mapping, the combined reducer and
/// the composed middleware are built eagerly. The store itself is built on
/// first access to [`StoreAssembler::store`] and reused afterwards.
pub struct StoreAssembler {
    reducer_defs: Vec<ReducerDef>,
    middleware: Vec<Enhancer>,
    reducers: Vec<SharedReducer>,
    reducer_map: IndexMap<String, BoundReducer>,
    combined: CombinedReducer,
    composed: Enhancer,
    create_store: OnceLock<StoreCreator>,
    store: OnceLock<Store>,
    // Held while the store is being built
    building: Mutex<()>,
}

impl StoreAssembler {
    pub fn new(reducer_defs: Vec<ReducerDef>, middleware: Vec<Enhancer>) -> Result<Self> {
        Self::with_config(&StoreConfig::default(), reducer_defs, middleware)
    }

    pub fn with_config(
        config: &StoreConfig,
        reducer_defs: Vec<ReducerDef>,
        middleware: Vec<Enhancer>,
    ) -> Result<Self> {
        let composed = compose(&middleware);

        let reducers: Vec<SharedReducer> = reducer_defs.iter().map(ReducerDef::instantiate).collect();
        let reducer_map = map_reducers(&reducer_defs, &reducers, config.duplicate_state_names)?;
        let combined = combine_reducers(reducer_map.clone());

        log::debug!(
            "Assembled {} reducer(s) [{}] with {} middleware",
            reducers.len(),
            combined.state_names().collect::<Vec<_>>().join(", "),
            middleware.len()
        );

        Ok(Self {
            reducer_defs,
            middleware,
            reducers,
            reducer_map,
            combined,
            composed,
            create_store: OnceLock::new(),
            store: OnceLock::new(),
            building: Mutex::new(()),
        })
    }

    /// Split a mixed list into reducers and middleware, keeping the relative
    /// order within each
    pub fn from_parts<I>(parts: I) -> Result<Self>
    where
        I: IntoIterator<Item = Part>,
    {
        Self::from_parts_with_config(&StoreConfig::default(), parts)
    }

    pub fn from_parts_with_config<I>(config: &StoreConfig, parts: I) -> Result<Self>
    where
        I: IntoIterator<Item = Part>,
    {
        let mut reducer_defs = Vec::new();
        let mut middleware = Vec::new();
        for part in parts {
            match part {
                Part::Reducer(def) => reducer_defs.push(def),
                Part::Middleware(enhancer) => middleware.push(enhancer),
            }
        }
        Self::with_config(config, reducer_defs, middleware)
    }

    /// The store constructor enhanced with all middleware
    pub fn create_store_fn(&self) -> &StoreCreator {
        self.create_store.get_or_init(|| {
            let base: StoreCreator = Arc::new(create_store);
            (self.composed)(base)
        })
    }

    /// The store, built on first access
    ///
    /// Concurrent first calls build it once; the others wait and get the same
    /// store. A failed build is returned and the next call tries again.
    pub fn store(&self) -> Result<&Store> {
        if let Some(store) = self.store.get() {
            return Ok(store);
        }

        let _building = self.building.lock();
        if let Some(store) = self.store.get() {
            return Ok(store);
        }

        let store = (self.create_store_fn())(self.combined.clone())?;
        log::debug!("Built store with initial state {}", store.state());
        Ok(self.store.get_or_init(|| store))
    }

    pub fn reducer_defs(&self) -> &[ReducerDef] {
        &self.reducer_defs
    }

    pub fn middleware(&self) -> &[Enhancer] {
        &self.middleware
    }

    /// Reducer instances, in definition order
    pub fn reducers(&self) -> &[SharedReducer] {
        &self.reducers
    }

    /// The stateName → bound reducer mapping handed to the combiner
    pub fn reducer_map(&self) -> &IndexMap<String, BoundReducer> {
        &self.reducer_map
    }

    pub fn combined(&self) -> &CombinedReducer {
        &self.combined
    }

    pub fn composed(&self) -> &Enhancer {
        &self.composed
    }
}

fn map_reducers(
    defs: &[ReducerDef],
    reducers: &[SharedReducer],
    duplicates: DuplicatePolicy,
) -> Result<IndexMap<String, BoundReducer>> {
    let mut map = IndexMap::with_capacity(reducers.len());

    for (def, reducer) in defs.iter().zip(reducers) {
        let state_name = reducer.lock().state_name().to_owned();
        if state_name.is_empty() {
            return Err(Error::MissingStateName {
                reducer: def.type_name(),
            });
        }

        if map.contains_key(&state_name) {
            match duplicates {
                DuplicatePolicy::Reject => return Err(Error::DuplicateStateName(state_name)),
                DuplicatePolicy::LastWins => {
                    log::warn!("{} replaces an earlier reducer for `{}`", def.type_name(), state_name);
                }
            }
        }
        map.insert(state_name, bind(reducer));
    }

    Ok(map)
}
