use crate::cmd::{check_bindings, load_registry, BindingArgs};
use crate::output::print_json;
use std::io::Write;
use std::path::Path;

/// Run a template locally.
///
/// By default the combined output is written verbatim and a failing command
/// fails this process. With `reply`, the exact text the bot would post is
/// printed instead, and failures are part of that text.
pub fn run(
    dir: &Path,
    name: &str,
    bindings: BindingArgs,
    reply: bool,
    json: bool,
) -> anyhow::Result<()> {
    let registry = load_registry(dir)?;
    let template = registry.require(name)?;
    let bindings = bindings.into_bindings();
    check_bindings(template, &bindings)?;

    if reply {
        let text = template.invoke(&bindings);
        if json {
            print_json(&serde_json::json!({ "reply": text }))?;
        } else {
            write_verbatim(&text)?;
        }
        return Ok(());
    }

    match template.execute(&bindings) {
        Ok(output) => {
            if json {
                print_json(&serde_json::json!({ "ok": true, "output": output }))?;
            } else {
                write_verbatim(&output)?;
            }
            Ok(())
        }
        Err(e) => {
            if json {
                print_json(&serde_json::json!({
                    "ok": false,
                    "error": e.to_string(),
                    "output": e.captured_output(),
                }))?;
            }
            Err(e.into())
        }
    }
}

fn write_verbatim(text: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()
}
