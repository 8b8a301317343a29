use crate::commands::CmdCtx;
use crate::error::{AppResult, DomainError};
use crate::models::search::SearchHit;
use crate::net::{Reply, ReplyCollector, TransportError};
use crate::rendering::item_view::candidates_embed;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, trace, warn};

#[derive(Debug)]
pub enum Selection {
    /// 1-based option picked by `reply`.
    Selected { option: usize, reply: Reply },
    TimedOut,
}

/// Accepts a reply whose trimmed content is one of `1..=options`.
pub fn parse_option(content: &str, options: usize) -> Option<usize> {
    let n = content.trim().parse::<usize>().ok()?;
    (1..=options).contains(&n).then_some(n)
}

/// Waits for the first reply naming a valid option. Everything else is ignored. The deadline is
/// fixed up front, so ignored replies do not extend the wait.
pub async fn await_selection(collector: &mut ReplyCollector, options: usize, timeout: Duration) -> Selection {
    let deadline = Instant::now() + timeout;

    let first_valid = async {
        while let Some(reply) = collector.next().await {
            match parse_option(&reply.content, options) {
                Some(option) => return Some((option, reply)),
                None => trace!(content = %reply.content, "ignoring reply"),
            }
        }
        None
    };

    match timeout_at(deadline, first_valid).await {
        Ok(Some((option, reply))) => Selection::Selected { option, reply },
        Ok(None) => {
            debug!("reply stream closed while waiting for a selection");
            Selection::TimedOut
        }
        Err(_) => Selection::TimedOut,
    }
}

/// Shows the numbered candidates and returns the one the user picks.
pub(super) async fn choose<'a>(ctx: &CmdCtx, keyword: &str, hits: &'a [SearchHit]) -> AppResult<&'a SearchHit> {
    let channel = ctx.invocation.target_channel();

    // Subscribe before prompting so a quick reply is not missed.
    let mut collector = ctx.transport.collect_replies(channel);

    let prompt = candidates_embed(ctx.config(), keyword, hits);
    if let Err(e) = ctx.transport.send_embed(channel, &prompt).await {
        warn!(error = %e, %channel, "failed to post candidate list");
    }

    let selection = await_selection(&mut collector, hits.len(), ctx.config().prompt_timeout()).await;
    drop(collector);

    match selection {
        Selection::Selected { option, reply } => {
            debug!(option, author = %reply.author, "candidate selected");
            if ctx.invocation.settings.auto_delete {
                delete_reply(ctx, &reply).await;
            }
            Ok(&hits[option - 1])
        }
        Selection::TimedOut => Err(DomainError::NoSelection),
    }
}

async fn delete_reply(ctx: &CmdCtx, reply: &Reply) {
    match ctx.transport.delete_message(&reply.channel, reply.id).await {
        Ok(()) => {}
        Err(TransportError::PermissionDenied) => {
            warn!(channel = %reply.channel, "cannot auto-delete reply: bot lacks permission to manage messages")
        }
        Err(e) => warn!(error = %e, "failed to auto-delete reply"),
    }
}
