//! Discord dispatcher for cordctl templates, built on serenity.
//!
//! On startup the bot picks a guild, clears the application's existing guild
//! commands, and registers one slash command per loaded template. Each
//! interaction is rendered and executed on a blocking thread, and the output
//! becomes the reply. On Ctrl-C or SIGTERM the registered commands are
//! removed again before the shards shut down.

mod commands;
mod handler;

use std::sync::Arc;

use anyhow::{anyhow, bail, Context as _};
use cordctl_core::Registry;
use serenity::all::{GatewayIntents, GuildId};
use serenity::Client;
use tokio::sync::{mpsc, OnceCell};
use tracing::{info, warn};

pub use commands::{
    bindings_from_options, build_command, chunk_message, option_value, MAX_MESSAGE_LENGTH,
};
pub use handler::UNKNOWN_COMMAND_REPLY;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for the Discord dispatcher.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Discord bot token.
    pub token: String,
    /// Guild to register commands in. Defaults to the first guild the bot
    /// belongs to.
    pub guild_id: Option<u64>,
}

impl BotConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            guild_id: None,
        }
    }

    pub fn with_guild(mut self, guild_id: Option<u64>) -> Self {
        self.guild_id = guild_id;
        self
    }
}

// ============================================================================
// Run loop
// ============================================================================

/// Connect, register the registry's templates, and serve interactions until
/// a shutdown signal arrives or startup fails.
pub async fn run(config: BotConfig, registry: Arc<Registry>) -> anyhow::Result<()> {
    if config.token.trim().is_empty() {
        bail!("bot token is not set");
    }
    if config.guild_id == Some(0) {
        bail!("guild id must be non-zero");
    }
    if registry.is_empty() {
        bail!("no templates loaded; nothing to register");
    }

    info!(templates = registry.len(), "starting Discord bot");

    let (fatal_tx, mut fatal_rx) = mpsc::channel::<String>(1);
    let registration = Arc::new(OnceCell::new());
    let handler = handler::Handler {
        registry,
        guild_id: config.guild_id.map(GuildId::new),
        registration: registration.clone(),
        fatal_tx,
    };

    let mut client = Client::builder(&config.token, GatewayIntents::GUILDS)
        .event_handler(handler)
        .await
        .context("error creating Discord client")?;

    let http = client.http.clone();
    let shard_manager = client.shard_manager.clone();

    info!("connecting to Discord");
    let mut client_task = tokio::spawn(async move { client.start().await });

    let outcome = tokio::select! {
        () = shutdown_signal() => {
            info!("shutdown requested");
            Ok(())
        }
        Some(reason) = fatal_rx.recv() => Err(anyhow!(reason)),
        joined = &mut client_task => match joined {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(anyhow::Error::new(e).context("Discord client error")),
            Err(e) => Err(anyhow::Error::new(e).context("Discord client task failed")),
        },
    };

    if let Some(registration) = registration.get() {
        handler::unregister(&http, registration).await;
    }
    shard_manager.shutdown_all().await;
    client_task.abort();

    info!("Discord bot stopped");
    outcome
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
