use thiserror::Error;

/// Errors raised while assembling a store or reducing an action
#[derive(Error, Debug)]
pub enum Error {
    #[error("Every reducer must have a stateName to serve as its key in the store state ({reducer})")]
    MissingStateName { reducer: &'static str },

    #[error("Invalid action type: {0}")]
    UnhandledActionType(String),

    #[error("Duplicate stateName `{0}`: two reducers cannot share a key in the store state")]
    DuplicateStateName(String),

    #[error("Failed to convert state of slice `{name}`: {source}")]
    SliceState {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
