use crate::models::types::{ChannelId, MessageId};
use crate::net::transport::{ChatTransport, Reply, ReplyCollector, ReplyHub, TransportError, TransportResult};
use crate::rendering::text::{render_embed, DIM, RESET};
use crate::rendering::Embed;
use async_trait::async_trait;
use indexmap::IndexSet;
use parking_lot::Mutex;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Number of recently sent message ids kept editable.
const SENT_HISTORY: usize = 1024;

/// Terminal stand-in for a chat platform. Embeds are printed as text blocks; lines typed by the
/// user are fed back in through [`ConsoleTransport::publish`].
pub struct ConsoleTransport<W> {
    writer: tokio::sync::Mutex<W>,
    hub: ReplyHub,
    /// Oldest first; capped at `history`.
    sent: Mutex<IndexSet<MessageId>>,
    history: usize,
    /// When false, deletes fail the way a bot without "Manage Messages" would.
    manage_messages: bool,
}

impl<W> ConsoleTransport<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W, manage_messages: bool) -> Self {
        Self {
            writer: tokio::sync::Mutex::new(writer),
            hub: ReplyHub::new(),
            sent: Mutex::new(IndexSet::new()),
            history: SENT_HISTORY,
            manage_messages,
        }
    }

    /// Hands a typed line to whoever is collecting replies in its channel.
    pub fn publish(&self, reply: Reply) -> usize {
        self.hub.publish(reply)
    }

    pub fn shutdown(&self) {
        self.hub.close();
    }

    async fn write(&self, s: &str) -> TransportResult<()> {
        let mut w = self.writer.lock().await;
        w.write_all(s.as_bytes()).await?;
        w.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
impl ConsoleTransport<Vec<u8>> {
    /// Everything written so far.
    pub(crate) async fn output(&self) -> String {
        String::from_utf8_lossy(&self.writer.lock().await).into_owned()
    }
}

#[async_trait]
impl<W> ChatTransport for ConsoleTransport<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn send_embed(&self, channel: &ChannelId, embed: &Embed) -> TransportResult<MessageId> {
        let id = MessageId::new();
        self.write(&format!("{DIM}#{channel}{RESET}\r\n{}", render_embed(embed))).await?;
        {
            let mut sent = self.sent.lock();
            sent.insert(id);
            if sent.len() > self.history {
                sent.shift_remove_index(0);
            }
        }
        Ok(id)
    }

    async fn edit_embed(&self, channel: &ChannelId, message: MessageId, embed: &Embed) -> TransportResult<()> {
        if !self.sent.lock().contains(&message) {
            return Err(TransportError::UnknownMessage(message));
        }
        self.write(&format!("{DIM}#{channel} (edited){RESET}\r\n{}", render_embed(embed))).await
    }

    async fn delete_message(&self, channel: &ChannelId, message: MessageId) -> TransportResult<()> {
        if !self.manage_messages {
            return Err(TransportError::PermissionDenied);
        }
        self.sent.lock().shift_remove(&message);
        self.write(&format!("{DIM}#{channel}: message {message} deleted{RESET}\r\n")).await
    }

    fn collect_replies(&self, channel: &ChannelId) -> ReplyCollector {
        self.hub.subscribe(channel)
    }
}
