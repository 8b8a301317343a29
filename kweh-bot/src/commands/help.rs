use crate::commands::{help_text, CmdCtx, CommandResult};
use crate::rendering::Embed;
use std::sync::Arc;

pub async fn help(ctx: Arc<CmdCtx>) -> CommandResult<()> {
    let embed = Embed::new(ctx.config().embed_color)
        .title("Available commands")
        .description(help_text(&ctx.invocation.settings.prefix));
    ctx.transport.send_embed(ctx.invocation.target_channel(), &embed).await?;
    Ok(())
}
