//! Path utilities: expand ~ and locate the configuration file.

use std::path::PathBuf;

/// File names probed, in order, in each search directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = [".palgate.yaml", ".palgate.yml", ".palgate"];

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}

/// First existing config file in `dirs`, scanning names within each directory.
pub fn find_config_file(search_dirs: &[PathBuf]) -> Option<PathBuf> {
    search_dirs
        .iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|p| p.is_file())
}

/// Working directory first, then the home directory.
pub fn default_search_dirs() -> Vec<PathBuf> {
    let mut out = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        out.push(cwd);
    }
    if let Some(home) = dirs::home_dir() {
        out.push(home);
    }
    out
}
