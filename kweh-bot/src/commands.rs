use crate::config::Config;
use crate::models::types::ChannelId;
use crate::net::{ChatTransport, TransportError};
use crate::rendering::item_view::error_embed;
use crate::{Registry, ServerSettings};
use std::sync::Arc;
use thiserror::Error;

mod help;
pub mod item;

pub type CommandResult<T> = Result<T, CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Where a command was typed and the server options in force there.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub channel: ChannelId,
    pub settings: ServerSettings,
}

impl Invocation {
    pub fn new(channel: ChannelId, settings: ServerSettings) -> Self {
        Self { channel, settings }
    }

    /// Channel that receives the bot's output: the server's default channel when one is set,
    /// the originating channel otherwise.
    pub fn target_channel(&self) -> &ChannelId {
        self.settings.default_channel.as_ref().unwrap_or(&self.channel)
    }
}

/// Command context passed to command handlers
pub struct CmdCtx {
    /// Global service registry
    pub registry: Arc<Registry>,
    /// Chat platform the command arrived on
    pub transport: Arc<dyn ChatTransport>,
    pub invocation: Invocation,
}

impl CmdCtx {
    pub fn config(&self) -> &Config {
        &self.registry.config
    }

    /// Posts an error embed to the target channel. Delivery failures are logged, not returned.
    pub async fn send_error(&self, title: &str, message: &str) {
        let channel = self.invocation.target_channel();
        if let Err(e) = self.transport.send_embed(channel, &error_embed(title, message)).await {
            tracing::warn!(error = %e, %channel, "failed to post error message");
        }
    }
}

/// Dispatches one command line (prefix already stripped).
pub async fn process_command(raw: &str, ctx: Arc<CmdCtx>) -> CommandResult<()> {
    let raw = raw.trim();
    let (verb, args) = raw.split_once(char::is_whitespace).unwrap_or((raw, ""));

    match verb.to_ascii_lowercase().as_str() {
        "" => Ok(()),
        "item" | "i" => item::item(ctx, args.trim()).await,
        "help" | "h" => help::help(ctx).await,
        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}

pub fn help_text(prefix: &str) -> String {
    format!(
        "`{prefix}item <name>` Look up an item, its recipe and what it is used in\n\
         `{prefix}help` Show this help"
    )
}
