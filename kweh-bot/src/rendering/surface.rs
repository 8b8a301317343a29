use crate::models::types::{ChannelId, MessageId};
use crate::net::{ChatTransport, TransportResult};
use crate::rendering::Embed;

/// An embed that has been posted, kept together with the message it lives in so later phases
/// can patch single fields.
#[derive(Debug, Clone)]
pub struct Surface {
    pub channel: ChannelId,
    pub message: MessageId,
    pub embed: Embed,
}

impl Surface {
    pub async fn send(transport: &dyn ChatTransport, channel: ChannelId, embed: Embed) -> TransportResult<Self> {
        let message = transport.send_embed(&channel, &embed).await?;
        Ok(Self { channel, message, embed })
    }

    /// Replaces one field's value and re-publishes the embed. Returns `Ok(false)` without
    /// touching the message when the field does not exist.
    pub async fn patch_field(
        &mut self,
        transport: &dyn ChatTransport,
        name: &str,
        value: String,
    ) -> TransportResult<bool> {
        if !self.embed.set_field_value(name, value) {
            return Ok(false);
        }
        transport.edit_embed(&self.channel, self.message, &self.embed).await?;
        Ok(true)
    }
}
