//! Combine per-slice reducers into one reducer over the aggregate state

use crate::action::Action;
use crate::error::Result;
use crate::reducer::BoundReducer;
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// One reducer over the whole aggregate state
///
/// Slice order follows the order the reducers were combined in.
#[derive(Clone, Default)]
pub struct CombinedReducer {
    slices: IndexMap<String, BoundReducer>,
}

/// Combine a stateName → reducer mapping into a single reducer
pub fn combine_reducers(slices: IndexMap<String, BoundReducer>) -> CombinedReducer {
    CombinedReducer { slices }
}

impl CombinedReducer {
    /// Run every slice reducer on its own part of `state`
    ///
    /// A slice missing from `state` (or a missing `state` altogether) is
    /// reduced from that slice's initial state.
    pub fn reduce(&self, state: Option<&Value>, action: &Action) -> Result<Value> {
        let mut next = Map::with_capacity(self.slices.len());
        for (name, reducer) in &self.slices {
            let previous = state.and_then(|s| s.get(name));
            next.insert(name.clone(), reducer(previous, action)?);
        }
        Ok(Value::Object(next))
    }

    pub fn get(&self, state_name: &str) -> Option<&BoundReducer> {
        self.slices.get(state_name)
    }

    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.slices.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

impl std::fmt::Debug for CombinedReducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombinedReducer")
            .field("slices", &self.slices.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;
    use std::sync::Arc;

    fn counter(step: i64) -> BoundReducer {
        Arc::new(move |state: Option<&Value>, action: &Action| {
            let current = state.and_then(Value::as_i64).unwrap_or(0);
            match action.kind() {
                "STEP" => Ok(json!(current + step)),
                _ => Ok(json!(current)),
            }
        })
    }

    #[test]
    fn test_each_slice_gets_its_own_state() {
        let mut slices = IndexMap::new();
        slices.insert("ones".to_string(), counter(1));
        slices.insert("tens".to_string(), counter(10));
        let combined = combine_reducers(slices);

        let first = combined.reduce(None, &Action::new("STEP")).unwrap();
        assert_eq!(first, json!({"ones": 1, "tens": 10}));

        let second = combined.reduce(Some(&first), &Action::new("STEP")).unwrap();
        assert_eq!(second, json!({"ones": 2, "tens": 20}));
        assert_eq!(combined.state_names().collect::<Vec<_>>(), vec!["ones", "tens"]);
    }

    #[test]
    fn test_errors_propagate_unchanged() {
        let failing: BoundReducer = Arc::new(|_: Option<&Value>, action: &Action| {
            Err(Error::UnhandledActionType(action.kind().to_string()))
        });
        let mut slices = IndexMap::new();
        slices.insert("ok".to_string(), counter(1));
        slices.insert("failing".to_string(), failing);
        let combined = combine_reducers(slices);

        let err = combined.reduce(None, &Action::new("STEP")).unwrap_err();
        assert!(matches!(err, Error::UnhandledActionType(kind) if kind == "STEP"));
    }

    #[test]
    fn test_empty_combination() {
        let combined = CombinedReducer::default();
        assert!(combined.is_empty());
        assert_eq!(combined.reduce(None, &Action::init()).unwrap(), json!({}));
    }
}
