use crate::cmd::load_registry;
use crate::output::print_json;
use cordctl_core::validate::{self, TemplateWarning, WarnLevel};
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct CheckReport<'a> {
    name: &'a str,
    warnings: Vec<TemplateWarning>,
}

#[derive(Serialize)]
struct FailureReport {
    path: String,
    error: String,
}

pub fn run(dir: &Path, json: bool) -> anyhow::Result<()> {
    let registry = load_registry(dir)?;

    let reports: Vec<CheckReport<'_>> = registry
        .iter()
        .map(|t| CheckReport {
            name: t.name(),
            warnings: validate::validate(t),
        })
        .collect();

    let failed = !registry.failures().is_empty()
        || reports.iter().any(|r| validate::has_errors(&r.warnings));

    if json {
        let failures: Vec<FailureReport> = registry
            .failures()
            .iter()
            .map(|f| FailureReport {
                path: f.path.display().to_string(),
                error: f.error.to_string(),
            })
            .collect();
        print_json(&serde_json::json!({
            "ok": !failed,
            "templates": reports,
            "failures": failures,
        }))?;
    } else {
        for report in &reports {
            if report.warnings.is_empty() {
                println!("ok      {}", report.name);
                continue;
            }
            for w in &report.warnings {
                let level = match w.level {
                    WarnLevel::Warning => "warning",
                    WarnLevel::Error => "error",
                };
                println!("{level:<7} {}: {}", report.name, w.message);
            }
        }
        // Skipped files were already reported on stderr by load_registry.
        println!(
            "{} template(s) checked, {} file(s) skipped",
            reports.len(),
            registry.failures().len()
        );
    }

    if failed {
        anyhow::bail!("check found errors");
    }
    Ok(())
}
