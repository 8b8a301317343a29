use crate::models::types::ChannelId;

pub const DEFAULT_PREFIX: &str = "!";

/// Per-server options the item command honours.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Command prefix, shown in help output.
    pub prefix: String,
    /// Post results here instead of the channel the command came from.
    pub default_channel: Option<ChannelId>,
    /// Delete the user's numeric reply after a disambiguation prompt.
    pub auto_delete: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            default_channel: None,
            auto_delete: false,
        }
    }
}
