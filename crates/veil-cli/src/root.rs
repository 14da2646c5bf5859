use std::path::{Path, PathBuf};

/// Resolve the practice root directory.
///
/// Priority:
/// 1. `--root` flag / `VEIL_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `.veil/`
/// 3. The home directory
/// 4. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Walk upward looking for .veil/
    let mut dir = cwd.clone();
    loop {
        if dir.join(".veil").is_dir() {
            return dir;
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => break,
        }
    }

    if let Some(home) = home::home_dir() {
        return home;
    }

    cwd
}
