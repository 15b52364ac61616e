use tracing::info;

use crate::CommandMeta;
use crate::config::admin_guild;
use ffinfo_core::{Context, Error};
use ffinfo_store::impls::cooldown_config::{
    get_cooldown_override, guild_cooldown, set_cooldown_override,
};
use ffinfo_utils::formatting::format_compact_duration;
use ffinfo_utils::parse::parse_duration_seconds;

pub const META: CommandMeta = CommandMeta {
    name: "infocooldown",
    desc: "Set or view the per-user cooldown for `info` in this server.",
    category: "config",
    usage: "!infocooldown [seconds|30s|2m|clear]",
};

#[poise::command(prefix_command, slash_command, category = "Config")]
pub async fn infocooldown(
    ctx: Context<'_>,
    #[description = "Duration (e.g. 45, 2m), or 'clear'"]
    #[rest]
    input: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = admin_guild(ctx).await? else {
        return Ok(());
    };
    let store = &ctx.data().store;

    if let Some(input) = input
        .as_deref()
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
    {
        if input.eq_ignore_ascii_case("clear") {
            set_cooldown_override(store, guild_id.get(), None).await?;
            let fallback = guild_cooldown(store, guild_id.get()).await;
            info!(guild_id = guild_id.get(), "info cooldown override cleared");
            ctx.say(format!(
                "Cooldown override cleared. Using the default of {}.",
                format_compact_duration(fallback)
            ))
            .await?;
            return Ok(());
        }

        if let Some(seconds) = parse_duration_seconds(input) {
            set_cooldown_override(store, guild_id.get(), Some(seconds)).await?;
            info!(guild_id = guild_id.get(), seconds, "info cooldown override set");
            ctx.say(format!("Cooldown set to {}.", format_compact_duration(seconds)))
                .await?;
            return Ok(());
        }

        ctx.say("Provide a duration like `45`, `30s`, `2m`, or `clear`.")
            .await?;
        return Ok(());
    }

    let effective = guild_cooldown(store, guild_id.get()).await;
    let source = match get_cooldown_override(store, guild_id.get()).await {
        Some(_) => "server override",
        None => "default",
    };
    ctx.say(format!(
        "Current cooldown: {} ({}).",
        format_compact_duration(effective),
        source
    ))
    .await?;

    Ok(())
}
