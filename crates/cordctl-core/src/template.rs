use crate::error::{CordError, Result};
use crate::exec;
use crate::render::{self, Bindings};
use crate::schema::{self, Parameter};
use crate::slot::{self, Slot};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix of the reply text when an invocation fails.
pub const ERROR_PREFIX: &str = "Error executing command: ";

// ---------------------------------------------------------------------------
// TemplateSource
// ---------------------------------------------------------------------------

/// One template document as written on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateSource {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

// ---------------------------------------------------------------------------
// CompiledTemplate
// ---------------------------------------------------------------------------

/// A parsed template: slots in rendering order plus the derived parameter
/// schema. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledTemplate {
    name: String,
    description: String,
    command: String,
    slots: Vec<Slot>,
    parameters: Vec<Parameter>,
}

impl CompiledTemplate {
    pub fn compile(source: TemplateSource) -> Self {
        let slots = slot::parse_all(&source.args);
        let parameters = schema::derive(&slots);
        Self {
            name: source.name,
            description: source.description,
            command: source.command,
            slots,
            parameters,
        }
    }

    pub fn from_yaml(data: &str) -> Result<Self> {
        let source: TemplateSource = serde_yaml::from_str(data)?;
        Ok(Self::compile(source))
    }

    /// Read and compile one template file. Any failure is reported as
    /// [`CordError::SourceLoad`] naming the file.
    pub fn load(path: &Path) -> Result<Self> {
        let source_load = |reason: String| CordError::SourceLoad {
            path: path.to_path_buf(),
            reason,
        };
        let data = std::fs::read_to_string(path).map_err(|e| source_load(e.to_string()))?;
        let source: TemplateSource =
            serde_yaml::from_str(&data).map_err(|e| source_load(e.to_string()))?;
        if source.name.trim().is_empty() {
            return Err(source_load("missing 'name'".to_string()));
        }
        Ok(Self::compile(source))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Rendered arguments, without the base command.
    pub fn render(&self, bindings: &Bindings) -> Vec<String> {
        render::render(&self.slots, bindings)
    }

    /// The full process vector: base command followed by rendered arguments.
    pub fn command_line(&self, bindings: &Bindings) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.slots.len() + 1);
        argv.push(self.command.clone());
        argv.extend(self.render(bindings));
        argv
    }

    /// Render and run. Blocks until the process exits.
    pub fn execute(&self, bindings: &Bindings) -> Result<String> {
        let args = self.render(bindings);
        exec::execute(&self.command, &args)
    }

    /// Render, run, and turn the outcome into reply text. Failures become
    /// text prefixed with [`ERROR_PREFIX`]; an empty string means there is
    /// nothing to show.
    pub fn invoke(&self, bindings: &Bindings) -> String {
        match self.execute(bindings) {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(template = %self.name, error = %e, "invocation failed");
                format!("{ERROR_PREFIX}{e}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Value;
    use crate::schema::ValueType;
    use crate::slot::SlotKind;
    use tempfile::TempDir;

    const SCAN_YAML: &str = r#"
name: scan
description: Scan a host
command: tool
args:
  - "{$target}"
  - "--port={?port}"
  - "{=quiet}"
  - "{!yes}--assume-yes"
"#;

    fn bind(pairs: &[(&str, Value)]) -> Bindings {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn from_yaml_compiles_slots_and_parameters() {
        let t = CompiledTemplate::from_yaml(SCAN_YAML).unwrap();
        assert_eq!(t.name(), "scan");
        assert_eq!(t.description(), "Scan a host");
        assert_eq!(t.command(), "tool");
        assert_eq!(t.slots().len(), 4);
        assert_eq!(t.slots()[3].kind, SlotKind::PresenceFlag);

        let params = t.parameters();
        assert_eq!(params[0].name, "target");
        assert!(params[0].required);
        assert_eq!(t.parameter("quiet").unwrap().value_type, ValueType::Flag);
        assert_eq!(t.parameter("port").unwrap().value_type, ValueType::Text);
        assert!(t.parameter("assume-yes").is_none());
    }

    #[test]
    fn command_line_prepends_base_command() {
        let t = CompiledTemplate::from_yaml(SCAN_YAML).unwrap();
        let bindings = bind(&[("target", "host1".into()), ("quiet", "x".into())]);
        assert_eq!(t.command_line(&bindings), ["tool", "host1", "quiet"]);

        let bindings = bind(&[
            ("target", "host1".into()),
            ("port", "22".into()),
            ("yes", true.into()),
        ]);
        assert_eq!(
            t.command_line(&bindings),
            ["tool", "host1", "--port=22", "--assume-yes"]
        );
    }

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let t = CompiledTemplate::from_yaml("name: bare\n").unwrap();
        assert_eq!(t.description(), "");
        assert_eq!(t.command(), "");
        assert!(t.slots().is_empty());
        assert!(t.parameters().is_empty());
    }

    #[test]
    fn empty_command_fails_every_invocation() {
        let t = CompiledTemplate::from_yaml("name: nothing\ncommand: \"\"\nargs: [\"{$x}\"]\n")
            .unwrap();
        assert!(matches!(
            t.execute(&Bindings::new()),
            Err(CordError::EmptyInvocation)
        ));
        let reply = t.invoke(&bind(&[("x", "1".into())]));
        assert!(reply.starts_with(ERROR_PREFIX), "reply: {reply}");
    }

    #[test]
    fn load_rejects_missing_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("anon.yaml");
        std::fs::write(&path, "command: echo\n").unwrap();
        let err = CompiledTemplate::load(&path).unwrap_err();
        assert!(matches!(err, CordError::SourceLoad { .. }));
        assert!(err.to_string().contains("anon.yaml"));
    }

    #[test]
    fn load_reports_malformed_yaml_as_source_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.yaml");
        std::fs::write(&path, "name: [unterminated\n").unwrap();
        assert!(matches!(
            CompiledTemplate::load(&path),
            Err(CordError::SourceLoad { .. })
        ));
    }

    #[test]
    fn load_reports_unreadable_file_as_source_load() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            CompiledTemplate::load(&dir.path().join("missing.yaml")),
            Err(CordError::SourceLoad { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn invoke_returns_output_verbatim() {
        let t = CompiledTemplate::from_yaml(
            "name: greet\ncommand: echo\nargs: [\"hello\", \"{?who}\"]\n",
        )
        .unwrap();
        assert_eq!(t.invoke(&bind(&[("who", "world".into())])), "hello world\n");
        assert_eq!(t.invoke(&Bindings::new()), "hello\n");
    }

    #[cfg(unix)]
    #[test]
    fn invoke_wraps_failure_with_captured_output() {
        let t = CompiledTemplate::from_yaml(
            "name: fail\ncommand: sh\nargs: [\"-c\", \"echo oops; exit 1\"]\n",
        )
        .unwrap();
        let reply = t.invoke(&Bindings::new());
        assert!(reply.starts_with(ERROR_PREFIX), "reply: {reply}");
        assert!(reply.ends_with("oops\n"), "reply: {reply}");
    }

    #[cfg(unix)]
    #[test]
    fn silent_command_yields_empty_reply() {
        let t = CompiledTemplate::from_yaml("name: quiet\ncommand: \"true\"\n").unwrap();
        assert_eq!(t.invoke(&Bindings::new()), "");
    }
}
