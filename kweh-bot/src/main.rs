use clap::Parser;
use kweh_bot::models::types::ChannelId;
use kweh_bot::net::connection::handle_lines;
use kweh_bot::net::console::ConsoleTransport;
use kweh_bot::state::settings::DEFAULT_PREFIX;
use kweh_bot::{Config, Registry, ServerSettings};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::BufReader;

/// Item lookup bot on a terminal. Lines starting with the prefix are commands, anything else is
/// posted to the channel as a user message.
#[derive(Debug, Parser)]
#[command(name = "kweh", version)]
struct Args {
    /// TOML config file; configuration is read from the environment when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Channel commands are typed in
    #[arg(long, default_value = "general")]
    channel: String,

    /// Post results to this channel instead
    #[arg(long)]
    override_channel: Option<String>,

    /// Delete numeric replies once an item was selected
    #[arg(long)]
    auto_delete: bool,

    /// Behave like a bot without permission to delete other users' messages
    #[arg(long)]
    no_manage_messages: bool,

    #[arg(long, default_value = DEFAULT_PREFIX)]
    prefix: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let cfg = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env()?,
    };

    let registry = Arc::new(Registry::from_config(cfg).await?);
    let transport = Arc::new(ConsoleTransport::new(tokio::io::stdout(), !args.no_manage_messages));

    let channel = ChannelId::new(args.channel);
    let settings = ServerSettings {
        prefix: args.prefix,
        default_channel: args.override_channel.map(ChannelId::new),
        auto_delete: args.auto_delete,
    };
    tracing::info!(%channel, prefix = %settings.prefix, "kweh ready");

    let stdin = BufReader::new(tokio::io::stdin());
    handle_lines(stdin, registry, transport, channel, settings).await?;
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{prelude::*, EnvFilter};

    // stdout carries the chat output
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,kweh_bot=debug"))
        .unwrap();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
