//! Operator-facing checks on compiled templates.
//!
//! Nothing here blocks loading or invocation. The checks catch templates the
//! chat platform would refuse to register, or that can never run.

use crate::paths;
use crate::template::CompiledTemplate;
use serde::{Deserialize, Serialize};

pub const MAX_DESCRIPTION_LEN: usize = 100;
pub const MAX_PARAMETERS: usize = 25;

// ---------------------------------------------------------------------------
// TemplateWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

impl TemplateWarning {
    fn warning(message: String) -> Self {
        Self {
            level: WarnLevel::Warning,
            message,
        }
    }

    fn error(message: String) -> Self {
        Self {
            level: WarnLevel::Error,
            message,
        }
    }
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

pub fn validate(template: &CompiledTemplate) -> Vec<TemplateWarning> {
    let mut warnings = Vec::new();
    let name = template.name();

    // 1. Command name must be registrable
    if !paths::is_valid_name(name) {
        warnings.push(TemplateWarning::error(format!(
            "name '{name}' must be 1-{} lowercase letters, digits, '-' or '_'",
            paths::MAX_NAME_LEN
        )));
    }

    // 2. Description
    let desc_len = template.description().chars().count();
    if desc_len == 0 {
        warnings.push(TemplateWarning::warning(format!(
            "'{name}' has no description; its name will be advertised instead"
        )));
    } else if desc_len > MAX_DESCRIPTION_LEN {
        warnings.push(TemplateWarning::error(format!(
            "'{name}' description is {desc_len} characters (max {MAX_DESCRIPTION_LEN})"
        )));
    }

    // 3. Parameters
    for param in template.parameters() {
        if !paths::is_valid_name(&param.name) {
            warnings.push(TemplateWarning::error(format!(
                "'{name}' parameter '{}' is not a valid option name",
                param.name
            )));
        }
    }
    if template.parameters().len() > MAX_PARAMETERS {
        warnings.push(TemplateWarning::error(format!(
            "'{name}' has {} parameters (max {MAX_PARAMETERS})",
            template.parameters().len()
        )));
    }

    for slot in template.slots() {
        if let Some(sigil) = slot.kind.sigil() {
            if slot.token.is_empty() {
                warnings.push(TemplateWarning::warning(format!(
                    "'{name}' has a '{{{sigil}}}' placeholder with no name; it never renders"
                )));
            }
        }
    }

    // 4. Base command
    let command = template.command();
    if command.trim().is_empty() {
        warnings.push(TemplateWarning::warning(format!(
            "'{name}' has no command; every invocation will fail"
        )));
    } else if which::which(command).is_err() {
        warnings.push(TemplateWarning::warning(format!(
            "'{name}' command '{command}' was not found on PATH"
        )));
    }

    warnings
}

pub fn has_errors(warnings: &[TemplateWarning]) -> bool {
    warnings.iter().any(|w| w.level == WarnLevel::Error)
}
