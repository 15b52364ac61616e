use poise::serenity_prelude as serenity;
use tracing::warn;

use crate::CommandMeta;
use crate::player::embeds::{LookupFailure, lookup_failure, outfit_failure_message, player_embed};
use crate::player::guard::{Invocation, admit};
use ffinfo_core::{Context, Error};
use ffinfo_utils::time::now_unix_millis;

pub const META: CommandMeta = CommandMeta {
    name: "info",
    desc: "Display a Free Fire player's information.",
    category: "free fire",
    usage: "!info <uid>",
};

pub(crate) fn guild_only_message() -> &'static str {
    "This command can only be used in a server."
}

/// Display a Free Fire player's information.
#[poise::command(prefix_command, slash_command, category = "Free Fire")]
pub async fn info(
    ctx: Context<'_>,
    #[description = "Enter the player's Free Fire UID."] uid: String,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    let uid = uid.trim().to_owned();
    let invocation = Invocation {
        guild_id: guild_id.get(),
        channel_id: ctx.channel_id().get(),
        user_id: ctx.author().id.get(),
        uid: &uid,
    };

    let data = ctx.data();
    let admitted = data
        .store
        .read(|config| admit(config, &data.cooldowns, &invocation, now_unix_millis()))
        .await;

    if let Err(rejection) = admitted {
        ctx.send(
            poise::CreateReply::default()
                .content(rejection.message())
                .ephemeral(true)
                .reply(true)
                .allowed_mentions(serenity::CreateAllowedMentions::new()),
        )
        .await?;
        return Ok(());
    }

    let typing = ctx.defer_or_broadcast().await?;
    let lookup = data.api.fetch_player(&uid).await;
    drop(typing);

    let player = match lookup {
        Ok(player) => player,
        Err(err) => {
            warn!(?err, uid = %uid, guild_id = guild_id.get(), "player lookup failed");
            match lookup_failure(&err, &uid) {
                LookupFailure::Embed(embed) => {
                    ctx.send(poise::CreateReply::default().embed(embed)).await?;
                }
                LookupFailure::Message(message) => {
                    ctx.say(message).await?;
                }
            }
            return Ok(());
        }
    };

    tracing::info!(
        uid = %uid,
        guild_id = guild_id.get(),
        user_id = ctx.author().id.get(),
        "player lookup served"
    );

    let embed = player_embed(&player, &uid, data.api.profile_card_url(&uid));
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    match data.api.fetch_outfit(&uid).await {
        Ok(image) => {
            let attachment = serenity::CreateAttachment::bytes(image.bytes, image.filename);
            ctx.send(poise::CreateReply::default().attachment(attachment))
                .await?;
        }
        Err(err) => {
            warn!(?err, uid = %uid, "outfit image fetch failed");
            ctx.say(outfit_failure_message(&err)).await?;
        }
    }

    Ok(())
}
