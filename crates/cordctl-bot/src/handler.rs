use std::sync::Arc;

use anyhow::{anyhow, bail, Context as _};
use cordctl_core::{CompiledTemplate, Registry, ERROR_PREFIX};
use serenity::all::{
    CommandId, CommandInteraction, CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, EditInteractionResponse, GuildId, Http, Interaction,
};
use serenity::async_trait;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use tokio::sync::{mpsc, OnceCell};
use tracing::{debug, error, info, warn};

use crate::commands::{bindings_from_options, build_command, chunk_message};

pub const UNKNOWN_COMMAND_REPLY: &str = "Unknown command. Please try again.";

/// Guild commands created at startup, removed again on shutdown.
#[derive(Debug)]
pub struct Registration {
    pub guild_id: GuildId,
    pub commands: Vec<(String, CommandId)>,
}

pub struct Handler {
    pub registry: Arc<Registry>,
    pub guild_id: Option<GuildId>,
    pub registration: Arc<OnceCell<Registration>>,
    /// Reports a startup failure that should stop the bot.
    pub fatal_tx: mpsc::Sender<String>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            user = %ready.user.name,
            user_id = %ready.user.id,
            "Discord bot connected"
        );

        // A fresh identify after a dropped session fires ready again.
        if self.registration.initialized() {
            debug!("commands already registered");
            return;
        }

        match register(&ctx.http, &self.registry, self.guild_id).await {
            Ok(registration) => {
                info!(
                    guild_id = %registration.guild_id,
                    commands = registration.commands.len(),
                    "bot is running; press Ctrl-C to exit"
                );
                let _ = self.registration.set(registration);
            }
            Err(e) => {
                error!(error = %format!("{e:#}"), "failed to register commands");
                let _ = self.fatal_tx.send(format!("{e:#}")).await;
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };

        info!(
            interaction_id = %command.id,
            command = %command.data.name,
            "received interaction"
        );

        let Some(template) = self.registry.get(&command.data.name) else {
            warn!(command = %command.data.name, "unknown command");
            respond(&ctx.http, &command, UNKNOWN_COMMAND_REPLY).await;
            return;
        };

        handle_command(&ctx.http, &command, template.clone()).await;
    }
}

// ============================================================================
// Registration
// ============================================================================

async fn register(
    http: &Arc<Http>,
    registry: &Registry,
    configured: Option<GuildId>,
) -> anyhow::Result<Registration> {
    let guild_id = select_guild(http, configured).await?;
    purge_commands(http, guild_id).await?;

    let mut commands: Vec<(String, CommandId)> = Vec::with_capacity(registry.len());
    for template in registry.iter() {
        info!(command = template.name(), "registering command");
        match guild_id.create_command(http, build_command(template)).await {
            Ok(created) => {
                info!(command = %created.name, id = %created.id, "registered command");
                commands.push((created.name, created.id));
            }
            Err(e) => {
                error!(command = template.name(), error = %e, "cannot create command");
                let partial = Registration { guild_id, commands };
                unregister(http, &partial).await;
                return Err(anyhow!("cannot create command '{}': {e}", template.name()));
            }
        }
    }

    Ok(Registration { guild_id, commands })
}

/// Pick the configured guild, or the first one the bot belongs to.
async fn select_guild(http: &Arc<Http>, configured: Option<GuildId>) -> anyhow::Result<GuildId> {
    let guilds = http
        .get_guilds(None, None)
        .await
        .context("failed to fetch guilds; check the bot's permissions")?;

    for guild in &guilds {
        info!(guild = %guild.name, guild_id = %guild.id, "guild available");
    }

    if let Some(id) = configured {
        if !guilds.iter().any(|g| g.id == id) {
            bail!("bot is not a member of guild {id}");
        }
        return Ok(id);
    }

    guilds
        .first()
        .map(|g| g.id)
        .ok_or_else(|| anyhow!("bot is not a member of any guild"))
}

/// Remove every command left over from earlier runs.
async fn purge_commands(http: &Arc<Http>, guild_id: GuildId) -> anyhow::Result<()> {
    let existing = guild_id
        .get_commands(http)
        .await
        .context("failed to fetch existing commands")?;

    for cmd in existing {
        match guild_id.delete_command(http, cmd.id).await {
            Ok(()) => info!(command = %cmd.name, "deleted command"),
            Err(e) => warn!(command = %cmd.name, error = %e, "failed to delete command"),
        }
    }
    Ok(())
}

pub async fn unregister(http: &Arc<Http>, registration: &Registration) {
    for (name, id) in &registration.commands {
        match registration.guild_id.delete_command(http, *id).await {
            Ok(()) => info!(command = %name, "unregistered command"),
            Err(e) => warn!(command = %name, error = %e, "failed to unregister command"),
        }
    }
}

// ============================================================================
// Interaction handling
// ============================================================================

async fn handle_command(
    http: &Arc<Http>,
    command: &CommandInteraction,
    template: CompiledTemplate,
) {
    let bindings = bindings_from_options(&command.data.options);
    debug!(command = template.name(), options = ?bindings, "command options");

    // Templates may run longer than the 3 seconds Discord allows before
    // the first response.
    if let Err(e) = command.defer(http).await {
        warn!(error = %e, "failed to defer interaction");
        return;
    }

    let reply = match tokio::task::spawn_blocking(move || template.invoke(&bindings)).await {
        Ok(reply) => reply,
        Err(e) => {
            error!(error = %e, "invocation task failed");
            format!("{ERROR_PREFIX}{e}")
        }
    };

    deliver(http, command, &reply).await;
}

/// Replace the deferred response with `reply`. An empty reply removes it.
async fn deliver(http: &Arc<Http>, command: &CommandInteraction, reply: &str) {
    if reply.is_empty() {
        if let Err(e) = command.delete_response(http).await {
            warn!(error = %e, "failed to delete deferred response");
        }
        return;
    }

    debug!(interaction_id = %command.id, len = reply.len(), "responding to interaction");
    let chunks = chunk_message(reply);
    let mut chunks = chunks.into_iter();

    if let Some(first) = chunks.next() {
        let edit = EditInteractionResponse::new().content(first);
        if let Err(e) = command.edit_response(http, edit).await {
            warn!(error = %e, "failed to respond to interaction");
            return;
        }
    }

    for chunk in chunks {
        let followup = CreateInteractionResponseFollowup::new().content(chunk);
        if let Err(e) = command.create_followup(http, followup).await {
            warn!(error = %e, "failed to send follow-up message");
            return;
        }
    }
}

async fn respond(http: &Arc<Http>, command: &CommandInteraction, message: &str) {
    let response =
        CreateInteractionResponse::Message(CreateInteractionResponseMessage::new().content(message));
    if let Err(e) = command.create_response(http, response).await {
        warn!(error = %e, "failed to respond to interaction");
    }
}
