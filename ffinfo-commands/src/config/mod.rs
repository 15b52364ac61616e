pub mod infochannel;
pub mod infocooldown;

use poise::serenity_prelude as serenity;

use crate::player::info::guild_only_message;
use ffinfo_core::{Context, Error};
use ffinfo_utils::permissions::is_administrator;

/// Resolve the invoking guild, replying and returning `None` when the command
/// is used outside a guild or by a non-administrator.
pub(crate) async fn admin_guild(ctx: Context<'_>) -> Result<Option<serenity::GuildId>, Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(None);
    };

    if !is_administrator(ctx.http(), guild_id, ctx.author().id).await? {
        ctx.send(
            poise::CreateReply::default()
                .content("🚫 You need the Administrator permission to use this command.")
                .ephemeral(true),
        )
        .await?;
        return Ok(None);
    }

    Ok(Some(guild_id))
}
