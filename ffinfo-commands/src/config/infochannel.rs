use tracing::info;

use crate::CommandMeta;
use crate::config::admin_guild;
use ffinfo_core::{Context, Error};
use ffinfo_store::impls::info_channels::{
    add_info_channel, list_info_channels, remove_info_channel,
};
use ffinfo_utils::parse::parse_channel_id;

pub const META: CommandMeta = CommandMeta {
    name: "infochannel",
    desc: "Manage the channels where `info` may be used.",
    category: "config",
    usage: "!infochannel <add|remove|list> [#channel|channel_id]",
};

#[poise::command(
    prefix_command,
    slash_command,
    category = "Config",
    subcommands("add", "remove", "list"),
    subcommand_required
)]
pub async fn infochannel(_ctx: Context<'_>) -> Result<(), Error> {
    Ok(())
}

/// Allow `info` in a channel (defaults to the current one).
#[poise::command(prefix_command, slash_command)]
pub async fn add(
    ctx: Context<'_>,
    #[description = "Channel mention or id"] channel: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = admin_guild(ctx).await? else {
        return Ok(());
    };
    let Some(channel_id) = target_channel(ctx, channel.as_deref()).await? else {
        return Ok(());
    };

    if add_info_channel(&ctx.data().store, guild_id.get(), channel_id).await? {
        info!(guild_id = guild_id.get(), channel_id, "info channel added");
        ctx.say(format!("✅ <#{}> added to the info channels.", channel_id))
            .await?;
    } else {
        ctx.say(format!("<#{}> is already an info channel.", channel_id))
            .await?;
    }

    Ok(())
}

/// Stop allowing `info` in a channel (defaults to the current one).
#[poise::command(prefix_command, slash_command)]
pub async fn remove(
    ctx: Context<'_>,
    #[description = "Channel mention or id"] channel: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = admin_guild(ctx).await? else {
        return Ok(());
    };
    let Some(channel_id) = target_channel(ctx, channel.as_deref()).await? else {
        return Ok(());
    };

    if remove_info_channel(&ctx.data().store, guild_id.get(), channel_id).await? {
        info!(guild_id = guild_id.get(), channel_id, "info channel removed");
        ctx.say(format!("✅ <#{}> removed from the info channels.", channel_id))
            .await?;
    } else {
        ctx.say(format!("<#{}> is not an info channel.", channel_id))
            .await?;
    }

    Ok(())
}

/// List the channels where `info` is allowed.
#[poise::command(prefix_command, slash_command)]
pub async fn list(ctx: Context<'_>) -> Result<(), Error> {
    let Some(guild_id) = admin_guild(ctx).await? else {
        return Ok(());
    };

    let channels = list_info_channels(&ctx.data().store, guild_id.get()).await;
    ctx.say(channel_list_message(&channels)).await?;
    Ok(())
}

async fn target_channel(ctx: Context<'_>, raw: Option<&str>) -> Result<Option<u64>, Error> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(Some(ctx.channel_id().get()));
    };

    if let Some(channel_id) = parse_channel_id(raw) {
        return Ok(Some(channel_id));
    }

    ctx.say("Provide a valid channel mention or id.").await?;
    Ok(None)
}

fn channel_list_message(channels: &[u64]) -> String {
    if channels.is_empty() {
        return "No info channels configured; `info` works in every channel.".to_owned();
    }

    let listed = channels
        .iter()
        .map(|id| format!("<#{}>", id))
        .collect::<Vec<_>>()
        .join("\n");
    format!("**Info channels:**\n{}", listed)
}
