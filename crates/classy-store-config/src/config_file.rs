use std::{env, path::PathBuf};

const CONFIG_FILE: &str = ".classy-store.toml";

/// Load config file content
///
/// Searches in order:
/// 1. `.classy-store.toml` in the current working directory
/// 2. `.classy-store.toml` in the home directory
/// 3. `config.toml` in the platform config directory
///
/// Returns the file content of the first hit, None otherwise.
pub fn load_config_file() -> Option<String> {
    candidate_paths().into_iter().find_map(|path| {
        let content = std::fs::read_to_string(&path).ok()?;
        log::debug!("Loaded config from {}", path.display());
        Some(content)
    })
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(home_config) = get_home_config_path() {
        paths.push(home_config);
    }
    if let Ok(platform_config) = crate::store_config_path() {
        paths.push(platform_config);
    }
    paths
}

/// Returns ~/.classy-store.toml if HOME environment variable is set.
fn get_home_config_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_FILE))
}
