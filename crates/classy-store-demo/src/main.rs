use anyhow::{Context, Result};
use classy_store::{apply_middleware, Action, Enhancer, LoggingMiddleware, ReducerDef, StoreAssembler};
use classy_store_config::StoreConfig;

mod slices;

use slices::{Todo, TodoSlice, TodosState, Visibility, VisibilitySlice};

fn reducer_defs() -> Vec<ReducerDef> {
    vec![ReducerDef::of::<TodoSlice>(), ReducerDef::of::<VisibilitySlice>()]
}

fn script() -> Vec<Action> {
    vec![
        Action::new("ADD_TODO").with("text", "Define slices as types"),
        Action::new("ADD_TODO").with("text", "Assemble them into a store"),
        Action::new("ADD_TODO").with("text", "Write the docs"),
        Action::new("TOGGLE_TODO").with("id", 0),
        Action::new("SET_VISIBILITY_FILTER").with("filter", "SHOW_ACTIVE"),
        Action::new("TOGGLE_TODO").with("id", 1),
        Action::new("CLEAR_COMPLETED"),
    ]
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting classy-store-demo");

    let config = StoreConfig::load();

    let mut middleware: Vec<Enhancer> = Vec::new();
    if config.log_actions {
        middleware.push(apply_middleware(LoggingMiddleware::with_level(
            config.action_log_level,
        )));
    }

    let assembler = StoreAssembler::with_config(
        &config,
        reducer_defs(),
        middleware,
    )
    .context("Failed to assemble store")?;
    let store = assembler.store().context("Failed to build store")?;

    store.subscribe(|state| {
        let open = state["todos"]["items"]
            .as_array()
            .map(|items| items.iter().filter(|t| t["completed"] == false).count())
            .unwrap_or(0);
        println!("state changed: {} open todo(s), filter {}", open, state["visibilityFilter"]);
    });

    for action in script() {
        store
            .dispatch(action)
            .context("Scripted action was rejected")?;
    }

    let todos: Vec<Todo> = store
        .slice::<TodosState>("todos")?
        .map(|todos| todos.items)
        .unwrap_or_default();
    let filter = store
        .slice::<Visibility>("visibilityFilter")?
        .unwrap_or_default();
    log::info!("{} todo(s) left, showing {:?}", todos.len(), filter);

    println!("{}", serde_json::to_string_pretty(&store.state())?);

    // Every action needs a handler somewhere
    if let Err(e) = store.dispatch(Action::new("ARCHIVE_TODO")) {
        println!("rejected: {}", e);
    }

    log::info!("Exiting classy-store-demo");
    Ok(())
}
