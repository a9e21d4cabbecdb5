//! Demo state slices
//!
//! Each slice owns one key of the aggregate state.

pub mod todos;
pub mod visibility;

pub use todos::{Todo, TodoSlice, TodosState};
pub use visibility::{Visibility, VisibilitySlice};
