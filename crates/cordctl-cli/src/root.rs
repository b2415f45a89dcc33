use cordctl_core::paths;
use std::path::{Path, PathBuf};

/// Resolve the template directory.
///
/// Priority:
/// 1. `--dir` flag / `CORDCTL_DIR` env var (passed in as `explicit`)
/// 2. `./commands` if it exists
/// 3. Fall back to `cwd`
pub fn resolve_commands_dir(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let default = paths::default_commands_dir(&cwd);
    if default.is_dir() {
        return default;
    }

    cwd
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_dir_wins() {
        let dir = TempDir::new().unwrap();
        let result = resolve_commands_dir(Some(dir.path()));
        assert_eq!(result, dir.path());
    }

    #[test]
    fn explicit_dir_need_not_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        assert_eq!(resolve_commands_dir(Some(&missing)), missing);
    }
}
