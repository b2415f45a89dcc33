use crate::cmd::{check_bindings, load_registry, BindingArgs};
use crate::output::{print_json, quote_arg};
use std::path::Path;

/// Print the process vector a template would run, without running it.
pub fn run(dir: &Path, name: &str, bindings: BindingArgs, json: bool) -> anyhow::Result<()> {
    let registry = load_registry(dir)?;
    let template = registry.require(name)?;
    let bindings = bindings.into_bindings();
    check_bindings(template, &bindings)?;

    let line = template.command_line(&bindings);
    if json {
        print_json(&line)?;
    } else {
        let quoted: Vec<String> = line.iter().map(|a| quote_arg(a)).collect();
        println!("{}", quoted.join(" "));
    }
    Ok(())
}
