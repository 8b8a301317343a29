use crate::models::types::{ChannelId, MessageId};
use crate::rendering::Embed;
use async_trait::async_trait;
use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::mpsc;

pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Debug, Error)]
pub enum TransportError {
    /// The bot lacks the permission for this action in the channel
    #[error("missing permissions (50013)")]
    PermissionDenied,

    #[error("unknown message: {0}")]
    UnknownMessage(MessageId),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A chat message posted by a user.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub id: MessageId,
    pub channel: ChannelId,
    pub author: String,
    pub content: String,
}

impl Reply {
    pub fn new(channel: ChannelId, author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            channel,
            author: author.into(),
            content: content.into(),
        }
    }
}

/// Outbound display surface plus inbound reply collection for one chat platform.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Posts a new embed and returns the id of the created message.
    async fn send_embed(&self, channel: &ChannelId, embed: &Embed) -> TransportResult<MessageId>;

    /// Replaces the embed of a message previously sent with [`ChatTransport::send_embed`].
    async fn edit_embed(&self, channel: &ChannelId, message: MessageId, embed: &Embed) -> TransportResult<()>;

    async fn delete_message(&self, channel: &ChannelId, message: MessageId) -> TransportResult<()>;

    /// Starts collecting messages posted in `channel` from now on. Collection stops when the
    /// returned collector is dropped.
    fn collect_replies(&self, channel: &ChannelId) -> ReplyCollector;
}

/// Receiving end of a reply subscription. Unbounded in time; callers apply their own deadline.
pub struct ReplyCollector {
    rx: mpsc::UnboundedReceiver<Reply>,
}

impl ReplyCollector {
    /// Next reply, or `None` once the transport has shut down.
    pub async fn next(&mut self) -> Option<Reply> {
        self.rx.recv().await
    }
}

/// Fans incoming messages out to the collectors subscribed to their channel.
#[derive(Default)]
pub struct ReplyHub {
    subscribers: Mutex<Vec<(ChannelId, mpsc::UnboundedSender<Reply>)>>,
}

impl ReplyHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, channel: &ChannelId) -> ReplyCollector {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.lock().push((channel.clone(), tx));
        ReplyCollector { rx }
    }

    /// Delivers `reply` to every live collector of its channel and returns how many received it.
    /// Collectors that were dropped are pruned.
    pub fn publish(&self, reply: Reply) -> usize {
        let mut subs = self.subscribers.lock();
        subs.retain(|(_, tx)| !tx.is_closed());

        subs.iter()
            .filter(|(channel, _)| *channel == reply.channel)
            .filter(|(_, tx)| tx.send(reply.clone()).is_ok())
            .count()
    }

    /// Ends every subscription; pending `next()` calls return `None`.
    pub fn close(&self) {
        self.subscribers.lock().clear();
    }
}
