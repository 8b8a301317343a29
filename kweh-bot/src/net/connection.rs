use crate::commands::{process_command, CmdCtx, Invocation};
use crate::models::types::ChannelId;
use crate::net::console::ConsoleTransport;
use crate::net::Reply;
use crate::{Registry, ServerSettings};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite};
use tokio::task::{JoinError, JoinSet};

/// Author recorded on replies typed at the console.
const CONSOLE_AUTHOR: &str = "console";

/// Drives a console session from `reader`. Lines starting with the prefix run as commands in
/// their own task; any other line is posted to `channel` as a user reply. At end of input the
/// commands still running are awaited before the transport is shut down.
pub async fn handle_lines<R, W>(
    reader: R,
    registry: Arc<Registry>,
    transport: Arc<ConsoleTransport<W>>,
    channel: ChannelId,
    settings: ServerSettings,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let mut tasks = JoinSet::new();
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        while let Some(done) = tasks.try_join_next() {
            reap(done);
        }

        let Some(command) = line.strip_prefix(settings.prefix.as_str()) else {
            transport.publish(Reply::new(channel.clone(), CONSOLE_AUTHOR, line));
            continue;
        };

        let ctx = Arc::new(CmdCtx {
            registry: registry.clone(),
            transport: transport.clone(),
            invocation: Invocation::new(channel.clone(), settings.clone()),
        });
        tasks.spawn(run_command(command.to_string(), ctx));
    }

    if !tasks.is_empty() {
        tracing::debug!(pending = tasks.len(), "input closed, waiting for running commands");
    }
    while let Some(done) = tasks.join_next().await {
        reap(done);
    }

    transport.shutdown();
    Ok(())
}

async fn run_command(command: String, ctx: Arc<CmdCtx>) {
    if let Err(e) = process_command(&command, ctx.clone()).await {
        tracing::debug!(error = %e, %command, "command rejected");
        ctx.send_error("Error", &e.to_string()).await;
    }
}

fn reap(done: Result<(), JoinError>) {
    if let Err(e) = done {
        tracing::error!(error = %e, "command task failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::search::SearchResponse;
    use crate::repo::{CatalogRepo, MemoryCache, RepoError, RepoResult};
    use crate::Config;
    use async_trait::async_trait;
    use kweh_core::{ItemId, RecordKind};
    use std::time::Duration;

    /// Takes its time answering and never finds anything.
    struct SlowCatalog;

    #[async_trait]
    impl CatalogRepo for SlowCatalog {
        async fn search(&self, _name: &str, _limit: u32, _index: &str) -> RepoResult<SearchResponse> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(SearchResponse::default())
        }

        async fn get_raw(&self, _kind: RecordKind, _id: ItemId) -> RepoResult<String> {
            Err(RepoError::NotFound)
        }
    }

    async fn run(input: &str) -> Arc<ConsoleTransport<Vec<u8>>> {
        let registry = Arc::new(Registry::new(Config::default(), Arc::new(SlowCatalog), Arc::new(MemoryCache::new())));
        let transport = Arc::new(ConsoleTransport::new(Vec::new(), true));

        handle_lines(
            input.as_bytes(),
            registry,
            transport.clone(),
            ChannelId::new("general"),
            ServerSettings::default(),
        )
        .await
        .unwrap();
        transport
    }

    #[tokio::test(start_paused = true)]
    async fn commands_running_at_end_of_input_still_answer() {
        let out = run("!item Potion\n").await.output().await;
        assert!(out.contains("Couldn't find any item matching \"Potion\""), "{out}");
    }

    #[tokio::test(start_paused = true)]
    async fn every_command_line_gets_its_answer() {
        let out = run("!help\nhello there\n!dance\n!item Hi-Potion\n").await.output().await;

        assert!(out.contains("Available commands"));
        assert!(out.contains("unknown command: dance"));
        assert!(out.contains("Couldn't find any item matching \"Hi-Potion\""));
        assert!(!out.contains("hello there"));
    }
}
