use classy_store::{Action, Handlers, Reduction, Slice};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub text: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TodosState {
    pub items: Vec<Todo>,
    pub next_id: u64,
    /// Number of items the last action added, changed or removed
    pub last_touched: u64,
}

/// Action types that change the todo list
pub const TODO_ACTIONS: &[&str] = &["ADD_TODO", "TOGGLE_TODO", "REMOVE_TODO", "CLEAR_COMPLETED"];

/// Todo list slice, stored under `todos`
#[derive(Debug, Default)]
pub struct TodoSlice;

impl Slice for TodoSlice {
    type State = TodosState;

    fn state_name(&self) -> &str {
        "todos"
    }

    fn register(handlers: &mut Handlers<Self>) {
        handlers
            .on("ADD_TODO", Self::add_todo)
            .on("TOGGLE_TODO", Self::toggle_todo)
            .on("REMOVE_TODO", Self::remove_todo)
            .on("CLEAR_COMPLETED", Self::clear_completed)
            .on("SET_VISIBILITY_FILTER", |_, _, _, _| None);
    }

    fn before_action(
        &mut self,
        _action: &Action,
        state: &mut TodosState,
        reduction: &mut Reduction,
    ) -> Option<TodosState> {
        reduction.insert("count_before", state.items.len());
        None
    }

    fn after_action(
        &mut self,
        _action: &Action,
        state: &mut TodosState,
        reduction: &mut Reduction,
    ) -> Option<TodosState> {
        // Handlers that change items in place record it themselves; for the
        // rest the size difference is what was touched
        let touched = match reduction.get("touched").and_then(|v| v.as_u64()) {
            Some(touched) => touched,
            None => {
                let before = reduction
                    .get("count_before")
                    .and_then(|v| v.as_u64())
                    .unwrap_or(0);
                before.abs_diff(state.items.len() as u64)
            }
        };
        state.last_touched = touched;
        None
    }
}

impl TodoSlice {
    fn add_todo(
        &mut self,
        action: &Action,
        state: &mut TodosState,
        _reduction: &mut Reduction,
    ) -> Option<TodosState> {
        let text = action.field::<String>("text").unwrap_or_default();
        state.items.push(Todo {
            id: state.next_id,
            text,
            completed: false,
        });
        state.next_id += 1;
        None
    }

    fn toggle_todo(
        &mut self,
        action: &Action,
        state: &mut TodosState,
        reduction: &mut Reduction,
    ) -> Option<TodosState> {
        let id = action.field::<u64>("id");
        let mut touched = 0u64;
        for todo in state.items.iter_mut().filter(|t| Some(t.id) == id) {
            todo.completed = !todo.completed;
            touched += 1;
        }
        reduction.insert("touched", touched);
        None
    }

    fn remove_todo(
        &mut self,
        action: &Action,
        state: &mut TodosState,
        _reduction: &mut Reduction,
    ) -> Option<TodosState> {
        let id = action.field::<u64>("id");
        state.items.retain(|t| Some(t.id) != id);
        None
    }

    fn clear_completed(
        &mut self,
        _action: &Action,
        state: &mut TodosState,
        _reduction: &mut Reduction,
    ) -> Option<TodosState> {
        let items = state.items.iter().filter(|t| !t.completed).cloned().collect();
        Some(TodosState {
            items,
            ..state.clone()
        })
    }
}
