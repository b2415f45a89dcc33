use crate::cmd::load_registry;
use crate::output::{print_json, print_table};
use cordctl_core::{Parameter, ValueType};
use std::path::Path;

pub fn run(dir: &Path, json: bool) -> anyhow::Result<()> {
    let registry = load_registry(dir)?;

    if json {
        let items: Vec<serde_json::Value> = registry
            .iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name(),
                    "description": t.description(),
                    "command": t.command(),
                    "parameters": t.parameters(),
                })
            })
            .collect();
        print_json(&items)?;
        return Ok(());
    }

    if registry.is_empty() {
        println!("No templates found in {}.", dir.display());
        return Ok(());
    }

    let rows: Vec<Vec<String>> = registry
        .iter()
        .map(|t| {
            let params: Vec<String> = t.parameters().iter().map(param_usage).collect();
            vec![
                t.name().to_string(),
                t.description().to_string(),
                t.command().to_string(),
                params.join(" "),
            ]
        })
        .collect();
    print_table(&["NAME", "DESCRIPTION", "COMMAND", "PARAMETERS"], rows);
    Ok(())
}

/// `<name>` for required text, `[name]` for optional text, `[--name]` for flags.
pub fn param_usage(param: &Parameter) -> String {
    match (param.value_type, param.required) {
        (ValueType::Flag, _) => format!("[--{}]", param.name),
        (ValueType::Text, true) => format!("<{}>", param.name),
        (ValueType::Text, false) => format!("[{}]", param.name),
    }
}
