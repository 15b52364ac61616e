use poise::serenity_prelude as serenity;
use tracing::{error, info, warn};

use ffinfo_core::Data;

/// Leave a guild that is not on the whitelist.
pub async fn handle_guild_create_whitelist(
    ctx: &serenity::Context,
    data: &Data,
    guild: &serenity::Guild,
) {
    if data.guild_whitelist.permits(guild.id.get()) {
        return;
    }

    warn!(
        guild_id = guild.id.get(),
        guild_name = %guild.name,
        "Guild is not whitelisted; leaving."
    );

    match guild.id.leave(&ctx.http).await {
        Ok(()) => info!(guild_id = guild.id.get(), "Left non-whitelisted guild."),
        Err(source) => error!(?source, guild_id = guild.id.get(), "failed to leave guild"),
    }
}
