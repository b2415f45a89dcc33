use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CordError {
    #[error("failed to load {path}: {reason}")]
    SourceLoad { path: PathBuf, reason: String },

    #[error("duplicate template '{name}' in {path}: name already loaded")]
    DuplicateTemplate { name: String, path: PathBuf },

    #[error("commands directory not found: {0}")]
    CommandsDirNotFound(PathBuf),

    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("no command to run: template has no base command")]
    EmptyInvocation,

    #[error("{}", execution_display(.message, .output))]
    Execution { message: String, output: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl CordError {
    /// Output captured before an execution failure, if any.
    pub fn captured_output(&self) -> Option<&str> {
        match self {
            CordError::Execution { output, .. } if !output.is_empty() => Some(output),
            _ => None,
        }
    }
}

fn execution_display(message: &str, output: &str) -> String {
    if output.is_empty() {
        message.to_string()
    } else {
        format!("{message}\n{output}")
    }
}

pub type Result<T> = std::result::Result<T, CordError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_error_without_output_is_just_the_message() {
        let err = CordError::Execution {
            message: "exit status: 2".into(),
            output: String::new(),
        };
        assert_eq!(err.to_string(), "exit status: 2");
        assert!(err.captured_output().is_none());
    }

    #[test]
    fn execution_error_appends_captured_output() {
        let err = CordError::Execution {
            message: "exit status: 1".into(),
            output: "partial\n".into(),
        };
        assert_eq!(err.to_string(), "exit status: 1\npartial\n");
        assert_eq!(err.captured_output(), Some("partial\n"));
    }
}
