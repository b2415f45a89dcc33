use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

/// Template directory used when none is given and it exists under the cwd.
pub const DEFAULT_COMMANDS_DIR: &str = "commands";

pub const TEMPLATE_EXTENSIONS: &[&str] = &["yaml", "yml"];

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn default_commands_dir(cwd: &Path) -> PathBuf {
    cwd.join(DEFAULT_COMMANDS_DIR)
}

pub fn is_template_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| TEMPLATE_EXTENSIONS.contains(&e))
}

// ---------------------------------------------------------------------------
// Name validation
// ---------------------------------------------------------------------------

/// Longest command or option name the chat platform accepts.
pub const MAX_NAME_LEN: usize = 32;

static NAME_RE: OnceLock<Regex> = OnceLock::new();

fn name_re() -> &'static Regex {
    NAME_RE.get_or_init(|| Regex::new(r"^[-_a-z0-9]+$").unwrap())
}

/// Whether `name` can be registered as a slash command or option name.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().count() <= MAX_NAME_LEN && name_re().is_match(name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
