use crate::cmd::load_registry;
use anyhow::Context;
use cordctl_bot::BotConfig;
use cordctl_core::validate;
use std::path::Path;
use std::sync::Arc;

pub const TOKEN_ENV: &str = "DISCORD_BOT_TOKEN";

pub fn run(dir: &Path, guild: Option<u64>) -> anyhow::Result<()> {
    let token = std::env::var(TOKEN_ENV)
        .ok()
        .filter(|t| !t.trim().is_empty())
        .with_context(|| format!("{TOKEN_ENV} is not set"))?;

    let registry = load_registry(dir)?;
    for template in registry.iter() {
        for w in validate::validate(template) {
            tracing::warn!(template = template.name(), "{}", w.message);
        }
    }
    tracing::info!(
        dir = %dir.display(),
        templates = registry.len(),
        names = %registry.names().collect::<Vec<_>>().join(", "),
        "serving templates"
    );

    let config = BotConfig::new(token).with_guild(guild);
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(cordctl_bot::run(config, Arc::new(registry)))
}
