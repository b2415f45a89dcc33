pub mod check;
pub mod invoke;
pub mod list;
pub mod render;
pub mod serve;
pub mod show;

use anyhow::Context;
use clap::Args;
use cordctl_core::{Bindings, CompiledTemplate, Registry, Value};
use std::path::Path;

/// Load the template directory, reporting skipped files on stderr.
pub fn load_registry(dir: &Path) -> anyhow::Result<Registry> {
    let registry = Registry::load_dir(dir)
        .with_context(|| format!("failed to load templates from {}", dir.display()))?;
    for failure in registry.failures() {
        eprintln!("skipped {}: {}", failure.path.display(), failure.error);
    }
    Ok(registry)
}

// ---------------------------------------------------------------------------
// Binding flags shared by `render` and `invoke`
// ---------------------------------------------------------------------------

#[derive(Args, Debug, Default)]
pub struct BindingArgs {
    /// Bind a text parameter (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_key_val)]
    pub set: Vec<(String, String)>,

    /// Bind a flag parameter to true (repeatable)
    #[arg(long = "on", value_name = "NAME")]
    pub on: Vec<String>,

    /// Bind a flag parameter to false (repeatable)
    #[arg(long = "off", value_name = "NAME")]
    pub off: Vec<String>,
}

impl BindingArgs {
    /// Later flags win when a name is bound more than once: `--set`, then
    /// `--on`, then `--off`.
    pub fn into_bindings(self) -> Bindings {
        let mut bindings = Bindings::new();
        for (name, value) in self.set {
            bindings.insert(name, Value::Text(value));
        }
        for name in self.on {
            bindings.insert(name, Value::Flag(true));
        }
        for name in self.off {
            bindings.insert(name, Value::Flag(false));
        }
        bindings
    }
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    if name.is_empty() {
        return Err(format!("missing parameter name in '{s}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Bindings the chat platform would have refused: required parameters left
/// out, or names the template never declares.
pub fn check_bindings(template: &CompiledTemplate, bindings: &Bindings) -> anyhow::Result<()> {
    for name in bindings.keys() {
        if template.parameter(name).is_none() {
            eprintln!(
                "warning: '{}' is not a parameter of '{}'",
                name,
                template.name()
            );
        }
    }

    let missing: Vec<&str> = template
        .parameters()
        .iter()
        .filter(|p| p.required && !bindings.contains_key(&p.name))
        .map(|p| p.name.as_str())
        .collect();
    if !missing.is_empty() {
        anyhow::bail!(
            "missing required parameter(s) for '{}': {}",
            template.name(),
            missing.join(", ")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_key_val_splits_on_first_equals() {
        assert_eq!(
            parse_key_val("filter=a=b").unwrap(),
            ("filter".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_key_val("empty=").unwrap(),
            ("empty".to_string(), String::new())
        );
        assert!(parse_key_val("novalue").is_err());
        assert!(parse_key_val("=x").is_err());
    }

    #[test]
    fn later_flags_override_earlier_ones() {
        let args = BindingArgs {
            set: vec![("x".into(), "1".into()), ("y".into(), "2".into())],
            on: vec!["y".into(), "z".into()],
            off: vec!["z".into()],
        };
        let bindings = args.into_bindings();
        assert_eq!(bindings["x"], Value::Text("1".into()));
        assert_eq!(bindings["y"], Value::Flag(true));
        assert_eq!(bindings["z"], Value::Flag(false));
    }

    #[test]
    fn missing_required_parameter_is_rejected() {
        let t = CompiledTemplate::from_yaml("name: t\nargs: [\"{$host}\", \"{?port}\"]\n").unwrap();
        assert!(check_bindings(&t, &Bindings::new()).is_err());

        let mut bindings = Bindings::new();
        bindings.insert("host".into(), Value::Text("h".into()));
        assert!(check_bindings(&t, &bindings).is_ok());
    }
}
