//! Configuration for classy-store
//!
//! This crate provides:
//! - Config file discovery (CWD, home directory, platform config directory)
//! - Store assembly configuration (StoreConfig)

pub mod config_file;
pub mod paths;
pub mod store_config;

pub use config_file::load_config_file;
pub use paths::{config_dir, store_config_path};
pub use store_config::{DuplicatePolicy, StoreConfig};
