use crate::cmd::load_registry;
use crate::output::{print_json, print_table};
use std::path::Path;

pub fn run(dir: &Path, name: &str, json: bool) -> anyhow::Result<()> {
    let registry = load_registry(dir)?;
    let template = registry.require(name)?;

    if json {
        print_json(template)?;
        return Ok(());
    }

    println!("Name:         {}", template.name());
    println!("Description:  {}", template.description());
    println!("Command:      {}", template.command());

    println!();
    if template.parameters().is_empty() {
        println!("Parameters: (none)");
    } else {
        let rows = template
            .parameters()
            .iter()
            .map(|p| {
                vec![
                    p.name.clone(),
                    p.value_type.as_str().to_string(),
                    if p.required { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect();
        print_table(&["PARAMETER", "TYPE", "REQUIRED"], rows);
    }

    println!();
    if template.slots().is_empty() {
        println!("Arguments: (none)");
    } else {
        let rows = template
            .slots()
            .iter()
            .enumerate()
            .map(|(i, s)| {
                vec![
                    i.to_string(),
                    s.kind.as_str().to_string(),
                    s.prefix.clone(),
                    s.token.clone(),
                    s.suffix.clone(),
                ]
            })
            .collect();
        print_table(&["#", "KIND", "PREFIX", "TOKEN", "SUFFIX"], rows);
    }
    Ok(())
}
